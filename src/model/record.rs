use serde::{Deserialize, Serialize};

use super::faction::Faction;
use crate::id::FactionId;

/// Per-turn snapshot of one faction, one line in `turns.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub faction_id: FactionId,
    pub laborers: usize,
    pub combatants: usize,
    pub territory: usize,
    pub food: f64,
    pub building_materials: f64,
    pub alive: bool,
}

impl TurnRecord {
    pub fn capture(turn: u32, faction: &Faction) -> Self {
        Self {
            turn,
            faction_id: faction.id,
            laborers: faction.laborers.len(),
            combatants: faction.combatants.len(),
            territory: faction.territory.len(),
            food: faction.food,
            building_materials: faction.building_materials,
            alive: faction.alive,
        }
    }
}

/// One decisive battle, one line in `battles.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub turn: u32,
    pub attacker: FactionId,
    pub defender: FactionId,
    pub winner: FactionId,
    pub attacker_losses: usize,
    pub defender_losses: usize,
}
