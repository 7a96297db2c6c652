//! Simulation observer trait for progress reporting and data collection.

use fleet_agent::AgentStore;
use fleet_core::Tick;
use fleet_grid::Grid;

use crate::sim::TickOutcome;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, outcome: &TickOutcome) {
///         println!("{tick}: {} moved, {} denied", outcome.moved, outcome.denied);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after all seven phases of a tick have been applied.
    fn on_tick_end(&mut self, _tick: Tick, _outcome: &TickOutcome) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after `on_tick_end`.
    ///
    /// Read-only access to the grid and the full agent state lets output
    /// writers and renderers record a frame without the sim knowing about
    /// any specific format.
    fn on_snapshot(&mut self, _tick: Tick, _grid: &Grid, _agents: &AgentStore) {}

    /// Called once, after the tick in which the last agent reached its goal.
    fn on_settled(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
