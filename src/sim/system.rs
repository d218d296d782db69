use rand::RngCore;

use crate::model::World;

/// What a phase gets to work with during one tick: the whole world and the
/// run's single RNG stream.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
}

/// One phase of a tick, e.g. the economy pass or border fighting.
///
/// Phases run in registration order and are stored as `Box<dyn SimSystem>`.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn tick(&mut self, ctx: &mut TickContext);
}
