//! Per-turn action choice for a faction.
//!
//! Each turn the faction's stockpiles and head-count are turned into a weight
//! per action, and one action is drawn with probability proportional to its
//! weight. Every weight ends up at least 1, so any action can still happen.

use std::fmt;

use rand::{Rng, RngCore};

use super::rules::{EXPANSION_COST, FOOD_PER_TERRITORY, POPULATION_PER_TERRITORY};
use crate::model::{Faction, Grid};

/// What a faction does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactionAction {
    Expand,
    RecruitLaborers,
    RecruitCombatants,
    UpgradeCombatants,
    Idle,
}

impl FactionAction {
    pub const ALL: [FactionAction; 5] = [
        FactionAction::Expand,
        FactionAction::RecruitLaborers,
        FactionAction::RecruitCombatants,
        FactionAction::UpgradeCombatants,
        FactionAction::Idle,
    ];

    fn slot(self) -> usize {
        match self {
            FactionAction::Expand => 0,
            FactionAction::RecruitLaborers => 1,
            FactionAction::RecruitCombatants => 2,
            FactionAction::UpgradeCombatants => 3,
            FactionAction::Idle => 4,
        }
    }
}

impl fmt::Display for FactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FactionAction::Expand => "expand",
            FactionAction::RecruitLaborers => "recruit_laborers",
            FactionAction::RecruitCombatants => "recruit_combatants",
            FactionAction::UpgradeCombatants => "upgrade_combatants",
            FactionAction::Idle => "idle",
        };
        f.write_str(name)
    }
}

/// Selection weights, indexed in [`FactionAction::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionWeights([f64; 5]);

impl ActionWeights {
    pub fn get(&self, action: FactionAction) -> f64 {
        self.0[action.slot()]
    }

    fn add(&mut self, action: FactionAction, amount: f64) {
        self.0[action.slot()] += amount;
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Draw one action with probability proportional to its weight.
    pub fn choose(&self, rng: &mut dyn RngCore) -> FactionAction {
        let total = self.total();
        if total <= 0.0 {
            return FactionAction::Idle;
        }
        let mut roll = rng.random_range(0.0..total);
        for action in FactionAction::ALL {
            let w = self.get(action);
            if roll < w {
                return action;
            }
            roll -= w;
        }
        // float rounding can leave a sliver past the last bucket
        FactionAction::Idle
    }
}

/// Score every action for this faction's current situation.
pub fn action_weights(faction: &Faction) -> ActionWeights {
    use FactionAction::*;

    let mut weights = ActionWeights([0.0; 5]);
    let territory = faction.territory.len() as f64;
    let production = FOOD_PER_TERRITORY * territory;

    // Food
    if faction.food > production * 2.0 {
        weights.add(RecruitLaborers, 0.5);
        weights.add(RecruitCombatants, 0.5);
    } else if faction.food < production * 0.5 {
        weights.add(RecruitLaborers, -0.5);
        weights.add(RecruitCombatants, -0.5);
        weights.add(Idle, 0.5);
    }

    // Materials
    if faction.building_materials > EXPANSION_COST * 2.0 {
        weights.add(Expand, 0.5);
        weights.add(UpgradeCombatants, 0.5);
    } else if faction.building_materials < EXPANSION_COST * 0.5 {
        weights.add(Expand, -0.5);
        weights.add(UpgradeCombatants, -0.5);
        weights.add(Idle, 0.5);
    }

    // Headroom
    if (faction.population() as f64) < faction.capacity() as f64 * 0.8 {
        weights.add(RecruitLaborers, 0.5);
        weights.add(RecruitCombatants, 0.5);
    } else {
        weights.add(Expand, 0.5);
    }

    // Thin army
    if (faction.combatants.len() as f64) < territory * (POPULATION_PER_TERRITORY as f64 / 4.0) {
        weights.add(RecruitCombatants, 0.5);
        weights.add(UpgradeCombatants, 0.3);
    }

    for w in &mut weights.0 {
        *w = w.max(0.0) + 1.0;
    }
    weights
}

/// Result of one faction's action phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: FactionAction,
    /// Units recruited, cells claimed or upgrades bought. Always 0 for `Idle`.
    pub effect: usize,
}

impl ActionOutcome {
    /// Whether the action changed anything. Idling always counts as success.
    pub fn succeeded(&self) -> bool {
        self.action == FactionAction::Idle || self.effect > 0
    }
}

/// Carry out a specific action.
pub fn execute_action(
    action: FactionAction,
    faction: &mut Faction,
    grid: &mut Grid,
    rng: &mut dyn RngCore,
) -> ActionOutcome {
    let effect = match action {
        FactionAction::Expand => faction.expand(grid, rng),
        FactionAction::RecruitLaborers => faction.recruit_laborers(rng),
        FactionAction::RecruitCombatants => faction.recruit_combatants(rng),
        FactionAction::UpgradeCombatants => faction.upgrade_combatants(rng),
        FactionAction::Idle => 0,
    };
    ActionOutcome { action, effect }
}

/// Weigh the options, pick one at random and carry it out.
pub fn perform_action(
    faction: &mut Faction,
    grid: &mut Grid,
    rng: &mut dyn RngCore,
) -> ActionOutcome {
    let action = action_weights(faction).choose(rng);
    let outcome = execute_action(action, faction, grid, rng);
    tracing::debug!(
        faction = %faction.id,
        %action,
        effect = outcome.effect,
        succeeded = outcome.succeeded(),
        "action"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::id::FactionId;
    use crate::model::Coord;

    fn fresh() -> (Grid, Faction) {
        let mut grid = Grid::new(10);
        let faction = Faction::new(FactionId(1), &mut grid, Coord::new(4, 4)).unwrap();
        grid.place(&faction);
        (grid, faction)
    }

    fn assert_weight(weights: &ActionWeights, action: FactionAction, expected: f64) {
        let got = weights.get(action);
        assert!(
            (got - expected).abs() < 1e-9,
            "{action}: expected weight {expected}, got {got}"
        );
    }

    #[test]
    fn starving_broke_faction_prefers_idle() {
        let (_grid, faction) = fresh();
        // food 0, materials 0, pop 3 of 5, 1 combatant of 1.25
        let w = action_weights(&faction);
        assert_weight(&w, FactionAction::Expand, 1.0);
        assert_weight(&w, FactionAction::RecruitLaborers, 1.0);
        assert_weight(&w, FactionAction::RecruitCombatants, 1.5);
        assert_weight(&w, FactionAction::UpgradeCombatants, 1.0);
        assert_weight(&w, FactionAction::Idle, 2.0);
    }

    #[test]
    fn rich_crowded_faction_weights() {
        let (_grid, mut faction) = fresh();
        faction.food = 1000.0;
        faction.building_materials = 1000.0;
        faction.add_laborer();
        faction.add_laborer();
        // pop 5 of 5, 1 combatant of 1.25
        let w = action_weights(&faction);
        assert_weight(&w, FactionAction::Expand, 2.0);
        assert_weight(&w, FactionAction::RecruitLaborers, 1.5);
        assert_weight(&w, FactionAction::RecruitCombatants, 2.0);
        assert_weight(&w, FactionAction::UpgradeCombatants, 1.8);
        assert_weight(&w, FactionAction::Idle, 1.0);
    }

    #[test]
    fn every_weight_at_least_one() {
        let (_grid, mut faction) = fresh();
        for (food, materials) in [(0.0, 0.0), (40.0, 150.0), (1e6, 1e6)] {
            faction.food = food;
            faction.building_materials = materials;
            let w = action_weights(&faction);
            for action in FactionAction::ALL {
                assert!(w.get(action) >= 1.0, "{action} weight {}", w.get(action));
            }
        }
    }

    #[test]
    fn choose_follows_weights() {
        let mut weights = ActionWeights([0.0; 5]);
        weights.add(FactionAction::UpgradeCombatants, 1.0);
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(weights.choose(&mut rng), FactionAction::UpgradeCombatants);
        }
    }

    #[test]
    fn choose_reaches_every_action() {
        let (_grid, faction) = fresh();
        let w = action_weights(&faction);
        let mut rng = SmallRng::seed_from_u64(10);
        let mut seen: HashMap<FactionAction, u32> = HashMap::new();
        for _ in 0..2000 {
            *seen.entry(w.choose(&mut rng)).or_default() += 1;
        }
        assert_eq!(seen.len(), 5);
        // Idle (2.0) should come up about twice as often as Expand (1.0)
        assert!(seen[&FactionAction::Idle] > seen[&FactionAction::Expand]);
    }

    #[test]
    fn idle_always_succeeds() {
        let (mut grid, mut faction) = fresh();
        let mut rng = SmallRng::seed_from_u64(11);
        let outcome = execute_action(FactionAction::Idle, &mut faction, &mut grid, &mut rng);
        assert!(outcome.succeeded());
        assert_eq!(outcome.effect, 0);
    }

    #[test]
    fn failed_action_reports_false() {
        let (mut grid, mut faction) = fresh();
        let mut rng = SmallRng::seed_from_u64(12);
        let outcome = execute_action(FactionAction::Expand, &mut faction, &mut grid, &mut rng);
        assert!(!outcome.succeeded());
        assert_eq!(faction.territory.len(), 1);
    }
}
