//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use fleet_agent::AgentStore;
use fleet_core::Tick;
use fleet_grid::Grid;
use fleet_sim::{SimObserver, TickOutcome};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
///
/// The writer is finished when the fleet settles.  A run that ends any other
/// way (stalled, or stepped with `run_ticks`) should call
/// [`finish`][Self::finish] itself.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Idempotent.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, outcome: &TickOutcome) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(outcome));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, _grid: &Grid, agents: &AgentStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .views()
            .map(|v| AgentSnapshotRow::from_view(tick, &v))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_settled(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
