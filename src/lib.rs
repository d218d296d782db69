pub mod analytics;
pub mod display;
pub mod flush;
pub mod id;
pub mod model;
pub mod sim;

pub use id::{FactionId, IdGenerator};
pub use model::{
    BattleRecord, Combatant, Coord, Faction, Grid, Laborer, TurnRecord, Unit, Upkeep, World,
};
pub use sim::{ConfigError, SimConfig, SimState, Simulation};
