//! CSV agent loader.
//!
//! # CSV format
//!
//! One row per agent, in id order.  `symbol` may be left empty to take the
//! default (`A`, `B`, …).
//!
//! ```csv
//! symbol,start_row,start_col,goal_row,goal_col
//! A,0,0,4,4
//! B,0,4,4,0
//! ,2,0,2,4
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fleet_core::Cell;

use crate::builder::AgentSpec;
use crate::{AgentError, AgentResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AgentRecord {
    #[serde(default)]
    symbol:    String,
    start_row: u32,
    start_col: u32,
    goal_row:  u32,
    goal_col:  u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load agent specs from a CSV file.
///
/// Only the file format is checked here; endpoint validation happens in
/// [`AgentStoreBuilder::build`](crate::AgentStoreBuilder::build).
pub fn load_agents_csv(path: &Path) -> AgentResult<Vec<AgentSpec>> {
    let file = std::fs::File::open(path).map_err(AgentError::Io)?;
    load_agents_reader(file)
}

/// Like [`load_agents_csv`] but accepts any `Read` source.
pub fn load_agents_reader<R: Read>(reader: R) -> AgentResult<Vec<AgentSpec>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut specs = Vec::new();
    for (row, result) in csv_reader.deserialize::<AgentRecord>().enumerate() {
        let r = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        specs.push(AgentSpec {
            symbol: parse_symbol(&r.symbol, row)?,
            start:  Cell::new(r.start_row, r.start_col),
            goal:   Cell::new(r.goal_row, r.goal_col),
        });
    }
    Ok(specs)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_symbol(s: &str, row: usize) -> AgentResult<Option<char>> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) if !c.is_whitespace() => Ok(Some(c)),
        _ => Err(AgentError::Parse(format!(
            "row {row}: invalid symbol {s:?}: expected a single character"
        ))),
    }
}
