use super::policy::perform_action;
use super::system::{SimSystem, TickContext};
use crate::model::TurnRecord;

/// Runs every living faction through collect → act → consume, in creation order,
/// and snapshots each one for export before any border fighting.
pub struct EconomySystem;

impl SimSystem for EconomySystem {
    fn name(&self) -> &str {
        "economy"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let world = &mut *ctx.world;
        let turn = world.turn;
        for faction in world.factions.iter_mut().filter(|f| f.alive) {
            faction.collect_resources();
            perform_action(faction, &mut world.grid, &mut *ctx.rng);
            faction.consume_food();
            world.turn_records.push(TurnRecord::capture(turn, faction));
        }
    }
}
