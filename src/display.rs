//! Plain-text board rendering for watching a run in a terminal.

use crate::model::{Faction, Grid};

const COLOR_CODES: [&str; 12] = [
    "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[91m",
    "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m",
];
const RESET_CODE: &str = "\x1b[0m";
const EMPTY_CELL: &str = ".";

/// Render the board, one line per row. Owned cells show the owner's id,
/// empty ones a dot, all right-aligned to the widest id (minimum 2).
pub fn render_board(grid: &Grid, colored: bool) -> String {
    let max_id = grid
        .rows()
        .flatten()
        .filter_map(|cell| cell.map(|id| id.0))
        .max()
        .unwrap_or(0);
    let width = max_id.to_string().len().max(2);

    let mut out = String::new();
    for row in grid.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(id) if colored => {
                    let color = COLOR_CODES[(id.0 % COLOR_CODES.len() as u64) as usize];
                    format!("{color}{:>width$}{RESET_CODE}", id.0)
                }
                Some(id) => format!("{:>width$}", id.0),
                None => format!("{EMPTY_CELL:>width$}"),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// One status line per faction that is still alive.
pub fn render_summary<'a>(factions: impl IntoIterator<Item = &'a Faction>) -> String {
    factions
        .into_iter()
        .filter(|f| f.alive)
        .map(|f| format!("{f}\n"))
        .collect()
}
