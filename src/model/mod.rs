pub mod faction;
pub mod grid;
pub mod record;
pub mod unit;
pub mod world;

pub use faction::{Faction, UnitKind};
pub use grid::{Coord, Grid};
pub use record::{BattleRecord, TurnRecord};
pub use unit::{Combatant, Laborer, Unit, Upkeep};
pub use world::World;
