mod combat;
mod config;
mod conflicts;
mod economy;
mod policy;
pub mod rules;
mod runner;
mod system;

pub use combat::{CombatOutcome, resolve_combat, winner_casualties};
pub use config::{ConfigError, SimConfig};
pub use conflicts::ConflictSystem;
pub use economy::EconomySystem;
pub use policy::{
    ActionOutcome, ActionWeights, FactionAction, action_weights, execute_action, perform_action,
};
pub use runner::{SimState, Simulation, default_systems, dispatch_systems};
pub use system::{SimSystem, TickContext};
