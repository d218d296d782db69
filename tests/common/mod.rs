#![allow(dead_code)]

use std::collections::BTreeSet;

use territory_sim::model::*;

/// Two factions on opposite corners of a 10×10 board.
pub fn build_corner_world() -> World {
    let mut world = World::new(10);
    world.spawn_faction(Coord::new(0, 0));
    world.spawn_faction(Coord::new(9, 9));
    world
}

/// Two factions sharing a border, stocked so neither starves on the first tick.
pub fn build_neighbour_world() -> World {
    let mut world = World::new(10);
    world.spawn_faction(Coord::new(4, 4));
    world.spawn_faction(Coord::new(4, 5));
    for faction in &mut world.factions {
        faction.food = 1000.0;
    }
    world
}

/// Board cells and faction territories describe the same partition.
pub fn assert_partition(world: &World) {
    let mut union = BTreeSet::new();
    for faction in &world.factions {
        if !faction.alive {
            assert!(
                faction.territory.is_empty(),
                "dead faction {} still holds territory",
                faction.id
            );
            continue;
        }
        for &coord in &faction.territory {
            assert!(union.insert(coord), "cell {coord:?} held twice");
            assert_eq!(world.grid.owner(coord), Some(faction.id));
        }
    }
    assert_eq!(world.grid.occupied_cells(), union);
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
