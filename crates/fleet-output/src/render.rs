//! Text frame rendering.
//!
//! A frame is a pure projection of (grid, agents, tick) to a string:
//!
//! ```text
//! T3  5x5 grid
//! S . . . .
//! . A . # .
//! . . . . .
//! . # . B .
//! . . . . G
//!
//! A (1, 1) moving
//! B (3, 3) waiting 1
//! ```
//!
//! Glyphs: `#` blocked, `S` start, `G` goal, `.` free.  Agents that have not
//! reached their goal are drawn with their symbol on top of the cell.

use std::fmt::Write;

use fleet_agent::{AgentState, AgentStore, AgentView};
use fleet_core::Tick;
use fleet_grid::Grid;

/// Render one frame.  Cells are separated by single spaces.
pub fn render_frame(grid: &Grid, agents: &AgentStore, tick: Tick) -> String {
    let cols = grid.cols() as usize;
    let mut glyphs: Vec<char> = grid.cells().map(|(_, kind)| kind.as_char()).collect();

    for view in agents.views().filter(|v| v.state != AgentState::Reached) {
        if let Some(id) = grid.cell_id(view.position) {
            glyphs[id.index()] = view.symbol;
        }
    }

    let mut out = String::with_capacity(glyphs.len() * 2 + agents.count * 24 + 32);
    let _ = writeln!(out, "{tick}  {}x{} grid", grid.rows(), grid.cols());
    for row in glyphs.chunks(cols) {
        let line: Vec<String> = row.iter().map(char::to_string).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out.push('\n');
    for view in agents.views() {
        let _ = writeln!(out, "{}", status_line(&view));
    }
    out
}

/// `A (1, 2) waiting 3` style status for one agent.
pub fn status_line(view: &AgentView) -> String {
    match view.state {
        AgentState::Waiting => {
            format!("{} {} waiting {}", view.symbol, view.position, view.wait_budget)
        }
        state => format!("{} {} {}", view.symbol, view.position, state),
    }
}
