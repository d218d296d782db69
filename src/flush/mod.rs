mod jsonl;

pub use jsonl::{
    BATTLES_FILE, TURNS_FILE, flush_to_jsonl, load_battle_records, load_turn_records,
};
