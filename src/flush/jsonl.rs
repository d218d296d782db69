use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{BattleRecord, TurnRecord, World};

pub const TURNS_FILE: &str = "turns.jsonl";
pub const BATTLES_FILE: &str = "battles.jsonl";

/// One JSON object per line.
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Read a JSONL file back, skipping blank lines.
fn read_jsonl<T: DeserializeOwned>(path: &Path) -> io::Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        items.push(serde_json::from_str(&line)?);
    }
    Ok(items)
}

/// Write the run's history into `output_dir`, creating it if needed:
/// `turns.jsonl` holds one `TurnRecord` per faction per turn and
/// `battles.jsonl` one `BattleRecord` per decisive battle.
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join(TURNS_FILE), world.turn_records.iter())?;
    write_jsonl(&output_dir.join(BATTLES_FILE), world.battle_log.iter())?;

    Ok(())
}

pub fn load_turn_records(path: &Path) -> io::Result<Vec<TurnRecord>> {
    read_jsonl(path)
}

pub fn load_battle_records(path: &Path) -> io::Result<Vec<BattleRecord>> {
    read_jsonl(path)
}
