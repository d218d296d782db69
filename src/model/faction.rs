use std::collections::BTreeSet;
use std::fmt;

use rand::seq::{SliceRandom, index};
use rand::{Rng, RngCore};

use super::grid::{Coord, Grid};
use super::unit::{Combatant, Laborer, Unit, Upkeep};
use crate::id::FactionId;
use crate::sim::rules::{
    COMBATANT_RECRUIT_COST, EXPANSION_COST, FOOD_PER_TERRITORY, LABORER_RECRUIT_COST,
    MATERIAL_PER_LABORER, POPULATION_PER_TERRITORY, RECRUIT_FRACTION_MAX, RECRUIT_FRACTION_MIN,
    STARTING_COMBATANTS, STARTING_LABORERS, UPGRADE_COST, UPGRADE_FRACTION_MAX,
    UPGRADE_FRACTION_MIN,
};

/// Which unit type a recruitment drive produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Laborer,
    Combatant,
}

impl UnitKind {
    fn recruit_cost(self) -> f64 {
        match self {
            UnitKind::Laborer => LABORER_RECRUIT_COST,
            UnitKind::Combatant => COMBATANT_RECRUIT_COST,
        }
    }
}

/// One competing faction: its territory, units and stockpiles.
///
/// The faction only mutates its own state. Anything touching the board goes
/// through a `&mut Grid` so cell ownership and `territory` stay in lockstep.
#[derive(Debug, Clone)]
pub struct Faction {
    pub id: FactionId,
    pub territory: BTreeSet<Coord>,
    pub laborers: Vec<Laborer>,
    pub combatants: Vec<Combatant>,
    pub food: f64,
    pub building_materials: f64,
    pub alive: bool,
}

impl Faction {
    /// Create a faction holding `start` with the starting population.
    ///
    /// Returns `None` and leaves the grid untouched if `start` is off the board
    /// or already owned. Registration on the board is a separate [`Grid::place`] call.
    pub fn new(id: FactionId, grid: &mut Grid, start: Coord) -> Option<Self> {
        if !grid.is_empty(start) {
            return None;
        }
        let mut faction = Self {
            id,
            territory: BTreeSet::new(),
            laborers: Vec::new(),
            combatants: Vec::new(),
            food: 0.0,
            building_materials: 0.0,
            alive: true,
        };
        grid.claim(&mut faction, start);

        for _ in 0..STARTING_LABORERS {
            faction.add_laborer();
        }
        for _ in 0..STARTING_COMBATANTS {
            faction.add_combatant(Combatant::new());
        }
        Some(faction)
    }

    // --- Population ---

    pub fn population(&self) -> usize {
        self.laborers.len() + self.combatants.len()
    }

    pub fn capacity(&self) -> usize {
        self.territory.len() * POPULATION_PER_TERRITORY
    }

    pub fn has_room(&self) -> bool {
        self.population() < self.capacity()
    }

    pub fn total_strength(&self) -> u32 {
        self.combatants.iter().map(Combatant::strength).sum()
    }

    pub fn add_laborer(&mut self) -> bool {
        if !self.has_room() {
            return false;
        }
        self.laborers.push(Laborer);
        true
    }

    pub fn add_combatant(&mut self, combatant: Combatant) -> bool {
        if !self.has_room() {
            return false;
        }
        self.combatants.push(combatant);
        true
    }

    /// Remove the most recently added unit, combatants first.
    fn pop_youngest_unit(&mut self) -> Option<Unit> {
        if let Some(c) = self.combatants.pop() {
            return Some(Unit::Combatant(c));
        }
        self.laborers.pop().map(Unit::Laborer)
    }

    // --- Turn phases ---

    /// Gather this turn's materials (from laborers) and food (from territory).
    pub fn collect_resources(&mut self) {
        self.building_materials += self.laborers.len() as f64 * MATERIAL_PER_LABORER;
        self.food += self.territory.len() as f64 * FOOD_PER_TERRITORY;
    }

    pub fn food_upkeep(&self) -> f64 {
        let laborers: f64 = self.laborers.iter().map(|l| l.food_upkeep()).sum();
        let combatants: f64 = self.combatants.iter().map(|c| c.food_upkeep()).sum();
        laborers + combatants
    }

    /// Feed every unit. On a shortfall units starve and food drops to zero.
    ///
    /// Returns how many units starved.
    pub fn consume_food(&mut self) -> usize {
        let upkeep = self.food_upkeep();
        if self.food >= upkeep {
            self.food -= upkeep;
            return 0;
        }
        let lost = self.starve(upkeep - self.food);
        self.food = 0.0;
        lost
    }

    /// Drop units, newest combatants first and then newest laborers, until their
    /// upkeep covers `deficit` or nobody is left.
    fn starve(&mut self, mut deficit: f64) -> usize {
        let mut lost = 0;
        while deficit > 0.0 {
            let Some(unit) = self.pop_youngest_unit() else {
                break;
            };
            deficit -= unit.food_upkeep();
            lost += 1;
        }
        if lost > 0 {
            tracing::trace!(faction = %self.id, lost, "units starved");
        }
        lost
    }

    // --- Actions ---

    /// Spend a random share of food on new units of `kind`, up to free capacity.
    ///
    /// Returns the number recruited; zero means nothing changed.
    pub fn recruit(&mut self, kind: UnitKind, rng: &mut dyn RngCore) -> usize {
        let cost = kind.recruit_cost();
        if self.food < cost {
            return 0;
        }
        let share = rng.random_range(RECRUIT_FRACTION_MIN..RECRUIT_FRACTION_MAX);
        let budget = (self.food * share).floor();
        let affordable = (budget / cost).floor() as usize;
        let recruits = affordable.min(self.capacity().saturating_sub(self.population()));
        if recruits == 0 {
            return 0;
        }

        self.food -= recruits as f64 * cost;
        for _ in 0..recruits {
            match kind {
                UnitKind::Laborer => self.add_laborer(),
                UnitKind::Combatant => self.add_combatant(Combatant::new()),
            };
        }
        recruits
    }

    pub fn recruit_laborers(&mut self, rng: &mut dyn RngCore) -> usize {
        self.recruit(UnitKind::Laborer, rng)
    }

    pub fn recruit_combatants(&mut self, rng: &mut dyn RngCore) -> usize {
        self.recruit(UnitKind::Combatant, rng)
    }

    /// Spend a random share of materials claiming empty cells next to the territory.
    ///
    /// Returns the number of cells claimed.
    pub fn expand(&mut self, grid: &mut Grid, rng: &mut dyn RngCore) -> usize {
        if self.building_materials < EXPANSION_COST {
            return 0;
        }
        let frontier: Vec<Coord> = grid.empty_neighbors(self).into_iter().collect();
        if frontier.is_empty() {
            return 0;
        }

        let share = rng.random_range(RECRUIT_FRACTION_MIN..RECRUIT_FRACTION_MAX);
        let budget = (self.building_materials * share).floor();
        let wanted = ((budget / EXPANSION_COST).floor() as usize).min(frontier.len());
        if wanted == 0 {
            return 0;
        }

        let mut claimed = 0;
        for i in index::sample(rng, frontier.len(), wanted) {
            if self.building_materials < EXPANSION_COST {
                break;
            }
            if grid.claim(self, frontier[i]) {
                self.building_materials -= EXPANSION_COST;
                claimed += 1;
            }
        }
        claimed
    }

    /// Spend a random share of materials levelling up randomly chosen combatants.
    ///
    /// Returns the number of upgrades performed.
    pub fn upgrade_combatants(&mut self, rng: &mut dyn RngCore) -> usize {
        if self.building_materials < UPGRADE_COST {
            return 0;
        }
        let share = rng.random_range(UPGRADE_FRACTION_MIN..UPGRADE_FRACTION_MAX);
        let budget = (self.building_materials * share).floor();

        let mut eligible: Vec<usize> = self
            .combatants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_upgrade())
            .map(|(i, _)| i)
            .collect();
        let wanted = ((budget / UPGRADE_COST).floor() as usize).min(eligible.len());
        if wanted == 0 {
            return 0;
        }

        eligible.shuffle(rng);
        let mut upgraded = 0;
        for i in eligible.into_iter().take(wanted) {
            if self.combatants[i].upgrade() {
                self.building_materials -= UPGRADE_COST;
                upgraded += 1;
            }
        }
        upgraded
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.alive { "alive" } else { "eliminated" };
        write!(
            f,
            "Faction {} ({status}): laborers={}, combatants={} (strength {}), territory={}, food={}, materials={}",
            self.id,
            self.laborers.len(),
            self.combatants.len(),
            self.total_strength(),
            self.territory.len(),
            self.food as i64,
            self.building_materials as i64,
        )
    }
}
