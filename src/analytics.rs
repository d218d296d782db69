//! Per-faction time series built from exported turn records, for comparing
//! how factions developed over a run.

use std::collections::BTreeMap;
use std::fmt;

use crate::id::FactionId;
use crate::model::TurnRecord;

/// A quantity tracked per faction per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Food,
    BuildingMaterials,
    Laborers,
    Combatants,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Food,
        Metric::BuildingMaterials,
        Metric::Laborers,
        Metric::Combatants,
    ];

    pub fn of(self, record: &TurnRecord) -> f64 {
        match self {
            Metric::Food => record.food,
            Metric::BuildingMaterials => record.building_materials,
            Metric::Laborers => record.laborers as f64,
            Metric::Combatants => record.combatants as f64,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Food => "food",
            Metric::BuildingMaterials => "building_materials",
            Metric::Laborers => "laborers",
            Metric::Combatants => "combatants",
        })
    }
}

/// Turn records grouped by faction, each group sorted by turn.
#[derive(Debug, Default)]
pub struct FactionSeries {
    by_faction: BTreeMap<FactionId, Vec<TurnRecord>>,
}

impl FactionSeries {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TurnRecord>) -> Self {
        let mut by_faction: BTreeMap<FactionId, Vec<TurnRecord>> = BTreeMap::new();
        for record in records {
            by_faction
                .entry(record.faction_id)
                .or_default()
                .push(record.clone());
        }
        for rows in by_faction.values_mut() {
            rows.sort_by_key(|r| r.turn);
        }
        Self { by_faction }
    }

    /// Faction ids present, ascending.
    pub fn factions(&self) -> impl Iterator<Item = FactionId> + '_ {
        self.by_faction.keys().copied()
    }

    /// `(turn, value)` points for one faction, in turn order. Empty for unknown ids.
    pub fn series(&self, faction: FactionId, metric: Metric) -> Vec<(u32, f64)> {
        self.by_faction
            .get(&faction)
            .map(|rows| rows.iter().map(|r| (r.turn, metric.of(r))).collect())
            .unwrap_or_default()
    }

    /// Highest value each faction reached for `metric`.
    pub fn peak(&self, metric: Metric) -> BTreeMap<FactionId, f64> {
        self.by_faction
            .iter()
            .filter_map(|(&id, rows)| {
                rows.iter()
                    .map(|r| metric.of(r))
                    .reduce(f64::max)
                    .map(|peak| (id, peak))
            })
            .collect()
    }

    /// Last turn each faction was recorded alive.
    pub fn last_turn_alive(&self) -> BTreeMap<FactionId, u32> {
        self.by_faction
            .iter()
            .filter_map(|(&id, rows)| {
                rows.iter()
                    .filter(|r| r.alive)
                    .map(|r| r.turn)
                    .max()
                    .map(|turn| (id, turn))
            })
            .collect()
    }
}
