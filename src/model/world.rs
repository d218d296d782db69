use rand::RngCore;

use super::faction::Faction;
use super::grid::{Coord, Grid};
use super::record::{BattleRecord, TurnRecord};
use crate::id::{FactionId, IdGenerator};

/// Everything a simulation run owns: the board, the factions in creation
/// order, and the history collected for export.
#[derive(Debug)]
pub struct World {
    pub grid: Grid,
    /// Every faction ever created, dead ones included. Index order is creation order.
    pub factions: Vec<Faction>,
    pub id_gen: IdGenerator,
    pub turn: u32,
    pub turn_records: Vec<TurnRecord>,
    pub battle_log: Vec<BattleRecord>,
}

impl World {
    pub fn new(board_size: usize) -> Self {
        Self {
            grid: Grid::new(board_size),
            factions: Vec::new(),
            id_gen: IdGenerator::new(),
            turn: 0,
            turn_records: Vec::new(),
            battle_log: Vec::new(),
        }
    }

    /// Create a faction on an empty cell and register it on the board.
    ///
    /// # Panics
    /// Panics if `start` is off the board or already owned.
    pub fn spawn_faction(&mut self, start: Coord) -> FactionId {
        let id = self.id_gen.next_id();
        let Some(faction) = Faction::new(id, &mut self.grid, start) else {
            panic!("spawn_faction: cell {start:?} is not free");
        };
        self.grid.place(&faction);
        self.factions.push(faction);
        id
    }

    /// Place up to `count` factions on random empty cells.
    ///
    /// Stops early if the board fills. Returns how many were created.
    pub fn populate(&mut self, count: usize, rng: &mut dyn RngCore) -> usize {
        for placed in 0..count {
            let Some(start) = self.grid.random_empty_cell(rng) else {
                tracing::warn!(placed, requested = count, "board full before all factions placed");
                return placed;
            };
            self.spawn_faction(start);
        }
        count
    }

    pub fn alive_count(&self) -> usize {
        self.factions.iter().filter(|f| f.alive).count()
    }

    /// Indices into `factions` of the living ones, in creation order.
    pub fn alive_indices(&self) -> Vec<usize> {
        self.factions
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Borrow two distinct factions mutably, in argument order.
///
/// Free-standing so callers can hold the grid mutably at the same time.
///
/// # Panics
/// Panics if `a == b` or either index is out of range.
pub fn pair_mut(factions: &mut [Faction], a: usize, b: usize) -> (&mut Faction, &mut Faction) {
    assert_ne!(a, b, "pair_mut: indices must differ");
    if a < b {
        let (head, tail) = factions.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = factions.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn populate_places_distinct_factions() {
        let mut world = World::new(10);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(world.populate(10, &mut rng), 10);
        assert_eq!(world.alive_count(), 10);
        assert_eq!(world.grid.active_factions().len(), 10);

        let starts: BTreeSet<Coord> = world
            .factions
            .iter()
            .flat_map(|f| f.territory.iter().copied())
            .collect();
        assert_eq!(starts.len(), 10);
    }

    #[test]
    fn populate_stops_when_board_full() {
        let mut world = World::new(10);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(world.populate(150, &mut rng), 100);
        assert_eq!(world.factions.len(), 100);
    }

    #[test]
    fn ids_follow_creation_order() {
        let mut world = World::new(10);
        let a = world.spawn_faction(Coord::new(0, 0));
        let b = world.spawn_faction(Coord::new(9, 9));
        assert!(a < b);
        assert_eq!(world.factions[0].id, a);
        assert_eq!(world.factions[1].id, b);
        assert_eq!(world.factions[1].territory.len(), 1);
    }

    #[test]
    fn pair_mut_respects_argument_order() {
        let mut world = World::new(10);
        let a = world.spawn_faction(Coord::new(0, 0));
        let b = world.spawn_faction(Coord::new(9, 9));
        let (second, first) = pair_mut(&mut world.factions, 1, 0);
        assert_eq!(second.id, b);
        assert_eq!(first.id, a);
    }

    #[test]
    #[should_panic(expected = "not free")]
    fn spawn_on_owned_cell_panics() {
        let mut world = World::new(10);
        world.spawn_faction(Coord::new(3, 3));
        world.spawn_faction(Coord::new(3, 3));
    }
}
