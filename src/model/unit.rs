use crate::sim::rules::{
    BASE_COMBATANT_STRENGTH, COMBATANT_UPKEEP, LABORER_UPKEEP, MAX_COMBATANT_LEVEL,
    UPGRADE_STRENGTH_BONUS,
};

/// Anything a faction has to feed every turn.
pub trait Upkeep {
    /// Food consumed per turn.
    fn food_upkeep(&self) -> f64;
}

/// A worker that produces building materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Laborer;

impl Upkeep for Laborer {
    fn food_upkeep(&self) -> f64 {
        LABORER_UPKEEP
    }
}

/// A fighting unit. Strength is derived from level and only changes via [`Combatant::upgrade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant {
    level: u32,
    strength: u32,
}

impl Combatant {
    pub fn new() -> Self {
        Self::at_level(1)
    }

    /// Build a combatant already trained to `level` (clamped to `1..=MAX_COMBATANT_LEVEL`).
    pub fn at_level(level: u32) -> Self {
        let level = level.clamp(1, MAX_COMBATANT_LEVEL);
        Self {
            level,
            strength: BASE_COMBATANT_STRENGTH + (level - 1) * UPGRADE_STRENGTH_BONUS,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < MAX_COMBATANT_LEVEL
    }

    /// Raise the level by one. Returns false and leaves the unit untouched at max level.
    pub fn upgrade(&mut self) -> bool {
        if !self.can_upgrade() {
            return false;
        }
        self.level += 1;
        self.strength += UPGRADE_STRENGTH_BONUS;
        true
    }
}

impl Default for Combatant {
    fn default() -> Self {
        Self::new()
    }
}

impl Upkeep for Combatant {
    fn food_upkeep(&self) -> f64 {
        COMBATANT_UPKEEP
    }
}

/// Either kind of unit, for code that handles the population as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Laborer(Laborer),
    Combatant(Combatant),
}

impl Upkeep for Unit {
    fn food_upkeep(&self) -> f64 {
        match self {
            Unit::Laborer(l) => l.food_upkeep(),
            Unit::Combatant(c) => c.food_upkeep(),
        }
    }
}
