//! Tuning constants shared by the economy, combat and setup code.

// --- Board setup ---

pub const MIN_BOARD_SIZE: usize = 10;
pub const MAX_BOARD_SIZE: usize = 100;
pub const MIN_FACTIONS: usize = 2;
/// Maximum faction count is `size² / MAX_FACTIONS_RATIO`.
pub const MAX_FACTIONS_RATIO: usize = 10;
pub const DEFAULT_BOARD_SIZE: usize = 20;
pub const DEFAULT_FACTIONS: usize = 4;
/// Upper bound on the pause between ticks, in seconds.
pub const MAX_TURN_DELAY: f64 = 60.0;

// --- Resources ---

pub const FOOD_PER_TERRITORY: f64 = 25.0;
pub const MATERIAL_PER_LABORER: f64 = 4.0;
pub const PLUNDER_MIN: f64 = 0.2;
pub const PLUNDER_MAX: f64 = 0.6;

// --- Upkeep ---

pub const LABORER_UPKEEP: f64 = 3.0;
pub const COMBATANT_UPKEEP: f64 = 5.0;

// --- Recruitment ---

pub const LABORER_RECRUIT_COST: f64 = 5.0;
pub const COMBATANT_RECRUIT_COST: f64 = 7.0;
pub const RECRUIT_FRACTION_MIN: f64 = 0.1;
pub const RECRUIT_FRACTION_MAX: f64 = 0.5;

// --- Materials spending ---

pub const EXPANSION_COST: f64 = 200.0;
pub const UPGRADE_COST: f64 = 15.0;
pub const UPGRADE_FRACTION_MIN: f64 = 0.1;
pub const UPGRADE_FRACTION_MAX: f64 = 0.75;

// --- Combatants ---

pub const BASE_COMBATANT_STRENGTH: u32 = 4;
pub const UPGRADE_STRENGTH_BONUS: u32 = 2;
pub const MAX_COMBATANT_LEVEL: u32 = 5;

// --- Population ---

pub const POPULATION_PER_TERRITORY: usize = 5;
pub const STARTING_LABORERS: usize = 2;
pub const STARTING_COMBATANTS: usize = 1;

/// Largest faction count a board of the given side length accepts.
pub fn max_factions(board_size: usize) -> usize {
    board_size * board_size / MAX_FACTIONS_RATIO
}
