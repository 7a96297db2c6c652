//! Plain data row types written by output backends.

use fleet_agent::AgentView;
use fleet_core::Tick;
use fleet_sim::TickOutcome;

/// One agent's state at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u32,
    pub symbol:      char,
    pub tick:        u64,
    pub row:         u32,
    pub col:         u32,
    /// `moving`, `waiting`, `replanning` or `reached`.
    pub state:       &'static str,
    /// Remaining wait ticks; 0 unless waiting.
    pub wait_budget: u32,
}

impl AgentSnapshotRow {
    pub fn from_view(tick: Tick, view: &AgentView) -> Self {
        Self {
            agent_id:    view.id.0,
            symbol:      view.symbol,
            tick:        tick.0,
            row:         view.position.row,
            col:         view.position.col,
            state:       view.state.as_str(),
            wait_budget: view.wait_budget,
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub replanned: u64,
    pub moved:     u64,
    pub denied:    u64,
    pub arrived:   u64,
    pub settled:   bool,
}

impl From<&TickOutcome> for TickSummaryRow {
    fn from(o: &TickOutcome) -> Self {
        Self {
            tick:      o.tick.0,
            replanned: o.replanned as u64,
            moved:     o.moved as u64,
            denied:    o.denied as u64,
            arrived:   o.arrived as u64,
            settled:   o.settled,
        }
    }
}
