use std::collections::BTreeSet;

use rand::{Rng, RngCore};

use super::faction::Faction;
use crate::id::FactionId;

/// A cell position on the board. `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The N/S/E/W neighbours that do not underflow. Callers bound-check the upper side.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        [
            Some(Coord::new(x, y + 1)),
            y.checked_sub(1).map(|y| Coord::new(x, y)),
            Some(Coord::new(x + 1, y)),
            x.checked_sub(1).map(|x| Coord::new(x, y)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Square board mapping each cell to at most one owning faction, plus the
/// registry of factions still in play.
#[derive(Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<FactionId>>,
    active: Vec<FactionId>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            active: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn index(&self, coord: Coord) -> usize {
        coord.x * self.size + coord.y
    }

    /// Owner of a cell, or `None` if it is empty or off the board.
    pub fn owner(&self, coord: Coord) -> Option<FactionId> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells[self.index(coord)]
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.cells[self.index(coord)].is_none()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<FactionId>]> {
        self.cells.chunks(self.size)
    }

    /// All cells currently owned by some faction.
    pub fn occupied_cells(&self) -> BTreeSet<Coord> {
        (0..self.size)
            .flat_map(|x| (0..self.size).map(move |y| Coord::new(x, y)))
            .filter(|&c| self.owner(c).is_some())
            .collect()
    }

    /// Ids of factions registered as active, in placement order.
    pub fn active_factions(&self) -> &[FactionId] {
        &self.active
    }

    pub fn is_active(&self, id: FactionId) -> bool {
        self.active.contains(&id)
    }

    /// Register a faction as active on the board.
    pub fn place(&mut self, faction: &Faction) {
        if !self.is_active(faction.id) {
            self.active.push(faction.id);
        }
    }

    /// A uniformly random empty cell, or `None` when the board is full.
    pub fn random_empty_cell(&self, rng: &mut dyn RngCore) -> Option<Coord> {
        let empty: Vec<Coord> = (0..self.size)
            .flat_map(|x| (0..self.size).map(move |y| Coord::new(x, y)))
            .filter(|&c| self.is_empty(c))
            .collect();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.random_range(0..empty.len())])
    }

    /// Mark `coord` as owned by `faction` and add it to the faction's territory.
    ///
    /// Returns false if the cell is off the board or already owned.
    pub fn claim(&mut self, faction: &mut Faction, coord: Coord) -> bool {
        if !self.is_empty(coord) {
            return false;
        }
        let idx = self.index(coord);
        self.cells[idx] = Some(faction.id);
        faction.territory.insert(coord);
        true
    }

    /// In-bounds empty cells 4-adjacent to the faction's territory.
    pub fn empty_neighbors(&self, faction: &Faction) -> BTreeSet<Coord> {
        faction
            .territory
            .iter()
            .flat_map(|c| c.neighbors())
            .filter(|&n| self.is_empty(n))
            .collect()
    }

    /// Take the faction off the board: clear its cells, empty its territory,
    /// unregister it and mark it dead. Does nothing if it was already removed.
    pub fn remove(&mut self, faction: &mut Faction) {
        let Some(pos) = self.active.iter().position(|&id| id == faction.id) else {
            return;
        };
        self.active.remove(pos);
        faction.alive = false;
        for &coord in &faction.territory {
            let idx = self.index(coord);
            if self.cells[idx] == Some(faction.id) {
                self.cells[idx] = None;
            }
        }
        faction.territory.clear();
    }

    /// True iff some cell of `a` touches some cell of `b` N/S/E/W.
    pub fn adjacent(&self, a: &Faction, b: &Faction) -> bool {
        a.territory
            .iter()
            .flat_map(|c| c.neighbors())
            .any(|n| b.territory.contains(&n))
    }
}
