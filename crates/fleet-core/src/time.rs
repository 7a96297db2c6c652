//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Tick 0 is the state
//! produced by setup (every agent at its start cell); the first call to
//! `Simulation::tick` produces tick 1.  The final tick count reported by the
//! driver is therefore the number of `tick()` calls needed to settle.

use std::fmt;

use crate::{FleetError, FleetResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the most recently completed tick.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The last tick that was fully applied.  `Tick::ZERO` before the first
    /// call to `advance`.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick and return the new tick.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.current_tick
    }

    /// Number of ticks completed so far.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.current_tick.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ticks elapsed)", self.current_tick, self.elapsed())
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Default wait budget after the arbiter denies a move.
pub const DEFAULT_CONFLICT_WAIT_TICKS: u32 = 1;

/// Default wait budget after a replan finds no path.
pub const DEFAULT_REPLAN_WAIT_TICKS: u32 = 10;

/// Top-level run configuration.
///
/// Typically built in code by the driver (or deserialized with the `serde`
/// feature) and passed to `fleet_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Master RNG seed for obstacle generation.  The same seed always
    /// produces the same map.
    pub seed: u64,

    /// Ticks an agent waits after its move is denied.  Must be at least 1.
    pub conflict_wait_ticks: u32,

    /// Ticks an agent waits before retrying a replan that found no path.
    /// Must be at least 1.
    pub replan_wait_ticks: u32,

    /// Optional guard for the driver loop.  `None` runs until settled.
    pub max_ticks: Option<u64>,

    /// Hand a snapshot to observers every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            conflict_wait_ticks:   DEFAULT_CONFLICT_WAIT_TICKS,
            replan_wait_ticks:     DEFAULT_REPLAN_WAIT_TICKS,
            max_ticks:             None,
            output_interval_ticks: 1,
        }
    }
}

impl FleetConfig {
    /// Reject configurations the state machine cannot honour.
    pub fn validate(&self) -> FleetResult<()> {
        if self.conflict_wait_ticks == 0 {
            return Err(FleetError::Config(
                "conflict_wait_ticks must be at least 1".into(),
            ));
        }
        if self.replan_wait_ticks == 0 {
            return Err(FleetError::Config(
                "replan_wait_ticks must be at least 1".into(),
            ));
        }
        if self.max_ticks == Some(0) {
            return Err(FleetError::Config("max_ticks must be positive when set".into()));
        }
        Ok(())
    }

    /// `true` if observers should receive a snapshot after `tick`.
    #[inline]
    pub fn is_snapshot_tick(&self, tick: Tick) -> bool {
        self.output_interval_ticks > 0 && tick.0.is_multiple_of(self.output_interval_ticks)
    }
}
