//! The `Simulation` struct and its tick loop.

use tracing::{debug, info, warn};

use fleet_agent::{AgentState, AgentStore};
use fleet_core::{AgentId, Cell, FleetConfig, FleetError, SimClock, Tick};
use fleet_grid::{Grid, GridGraph, GridResult, Path, PathFinder};

use crate::arbiter::{ConflictArbiter, Intent, Verdict};
use crate::{SimError, SimObserver, SimResult};

// ── TickOutcome ───────────────────────────────────────────────────────────────

/// Summary of one processed tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickOutcome {
    pub tick:      Tick,
    /// Replanning searches run in phase 1.
    pub replanned: usize,
    /// Agents that changed cell.
    pub moved:     usize,
    /// Agents denied by the arbiter.
    pub denied:    usize,
    /// Agents that reached their goal this tick.
    pub arrived:   usize,
    /// Every agent is `Reached`.
    pub settled:   bool,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Simulation<P, A>` owns the grid, its adjacency graph and all agent state,
/// and drives the seven-phase tick:
///
/// 1. **Replan**: `Replanning` agents search from their position (parallel
///    with the `parallel` feature); found → `Moving`, unreachable →
///    `Waiting` for `replan_wait_ticks`.
/// 2. **Wait**: `Waiting` agents count down; at zero they resume.
/// 3. **Intents**: next path cell for `Moving` agents, current cell otherwise.
/// 4. **Arbitrate**: the [`ConflictArbiter`] rules on every intent.
/// 5. **Apply**: allowed moves advance; denied agents wait
///    `conflict_wait_ticks`.
/// 6. **Arrive**: agents on their goal become `Reached`.
/// 7. **Settle**: the tick is settled when every agent is `Reached`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<P: PathFinder, A: ConflictArbiter> {
    /// Wait budgets, seed, and driver guard.
    pub config: FleetConfig,

    /// Tick counter.  Tick 1 is the first processed tick.
    pub clock: SimClock,

    /// The static map, with agent endpoints marked.
    pub grid: Grid,

    /// Obstacle-free adjacency of `grid`, shared by every search.
    pub graph: GridGraph,

    /// Agent state (SoA arrays).
    pub agents: AgentStore,

    pub finder: P,

    pub arbiter: A,
}

impl<P: PathFinder, A: ConflictArbiter> Simulation<P, A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every agent has reached its goal and return the final tick.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// Returns [`SimError::Stalled`] if `config.max_ticks` elapses first.
    ///
    /// Settlement is not guaranteed.  The fleet stalls when a `Reached` agent
    /// is parked on a cell another agent's route still runs through (routes
    /// ignore other agents), or when two agents meet head-on: a denied agent
    /// keeps its path and retries the same step, so neither ever yields.
    /// When no goal lies on another agent's route and no two routes run
    /// head-on, a run settles within the longest initial path plus one
    /// `replan_wait_ticks` per agent.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        while !self.is_settled() {
            if let Some(max) = self.config.max_ticks {
                if self.clock.current_tick.0 >= max {
                    warn!(ticks = max, waiting = self.agents.count_in(AgentState::Waiting), "fleet stalled");
                    return Err(SimError::Stalled { ticks: max });
                }
            }
            self.step(observer);
        }
        Ok(self.clock.current_tick)
    }

    /// Run at most `n` ticks, stopping early once settled.  Returns whether
    /// the fleet is settled.  Ignores `max_ticks`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> bool {
        for _ in 0..n {
            if self.is_settled() {
                break;
            }
            self.step(observer);
        }
        self.is_settled()
    }

    /// Process a single tick without observer callbacks.
    pub fn tick(&mut self) -> TickOutcome {
        self.process_tick()
    }

    /// `true` once every agent is `Reached`.
    pub fn is_settled(&self) -> bool {
        self.agents.all_reached()
    }

    /// Force `agent` into `Replanning`; its new path is computed in phase 1
    /// of the next tick.
    pub fn request_replan(&mut self, agent: AgentId) -> SimResult<()> {
        if !self.agents.contains(agent) {
            return Err(FleetError::AgentNotFound(agent).into());
        }
        if !self.agents.begin_replan(agent) {
            return Err(SimError::AlreadyReached(agent));
        }
        debug!(%agent, "replan requested");
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_tick_start(self.clock.current_tick + 1);
        let outcome = self.process_tick();
        let now = outcome.tick;
        observer.on_tick_end(now, &outcome);
        if self.config.is_snapshot_tick(now) {
            observer.on_snapshot(now, &self.grid, &self.agents);
        }
        if outcome.settled {
            observer.on_settled(now);
        }
    }

    fn process_tick(&mut self) -> TickOutcome {
        let now = self.clock.advance();
        let mut outcome = TickOutcome { tick: now, ..TickOutcome::default() };

        // ── Phase 1: replanning ───────────────────────────────────────────
        let requests: Vec<(AgentId, Cell, Cell)> = self
            .agents
            .agent_ids()
            .filter(|&a| self.agents.state_of(a) == AgentState::Replanning)
            .map(|a| (a, self.agents.position[a.index()], self.agents.goal[a.index()]))
            .collect();
        outcome.replanned = requests.len();

        let routes = self.compute_routes(&requests);

        // Applied in ascending AgentId order regardless of how the searches
        // were scheduled.
        for ((agent, from, to), route) in requests.into_iter().zip(routes) {
            let steps = route.as_ref().map(Path::steps).ok();
            if self.agents.apply_route(agent, route, self.config.replan_wait_ticks) {
                debug!(%agent, %from, %to, steps, "replanned");
            } else {
                warn!(
                    %agent, %from, %to,
                    retry_in = self.config.replan_wait_ticks,
                    "replan found no path"
                );
            }
        }

        // ── Phase 2: waiting countdown ────────────────────────────────────
        let ids: Vec<AgentId> = self.agents.agent_ids().collect();
        for &agent in &ids {
            if let Some(state) = self.agents.tick_wait(agent) {
                debug!(%agent, %state, "wait expired");
            }
        }

        // ── Phase 3: intents ──────────────────────────────────────────────
        let intents: Vec<Intent> = self
            .agents
            .agent_ids()
            .map(|a| {
                let here = self.agents.position[a.index()];
                match self.agents.state_of(a) {
                    AgentState::Moving => Intent::step(a, here, self.agents.intent(a)),
                    _ => Intent::stay(a, here),
                }
            })
            .collect();

        // ── Phase 4: arbitration ──────────────────────────────────────────
        let rulings = self.arbiter.resolve(&intents);

        // ── Phase 5: apply ────────────────────────────────────────────────
        for ruling in rulings {
            let Intent { agent, from, to, contending } = ruling.intent;
            if !contending {
                continue;
            }
            match ruling.verdict {
                Verdict::Allowed if from != to => {
                    self.agents.advance(agent);
                    outcome.moved += 1;
                }
                Verdict::Allowed => {}
                Verdict::Denied(reason) => {
                    self.agents.deny(agent, self.config.conflict_wait_ticks);
                    outcome.denied += 1;
                    debug!(%agent, %from, %to, ?reason, "move denied");
                }
            }
        }

        // ── Phase 6: arrivals ─────────────────────────────────────────────
        for &agent in &ids {
            if self.agents.mark_reached(agent) {
                outcome.arrived += 1;
                debug!(%agent, tick = %now, "goal reached");
            }
        }

        // ── Phase 7: settlement ───────────────────────────────────────────
        outcome.settled = self.agents.all_reached();
        if outcome.settled {
            info!(ticks = now.0, agents = self.agents.count, "all agents reached their goals");
        }
        outcome
    }

    /// Run the replanning searches against the obstacle-free graph.
    ///
    /// With the `parallel` Cargo feature the searches run on Rayon's thread
    /// pool; results come back in request order either way.
    fn compute_routes(&self, requests: &[(AgentId, Cell, Cell)]) -> Vec<GridResult<Path>> {
        let graph  = &self.graph;
        let finder = &self.finder;

        #[cfg(not(feature = "parallel"))]
        {
            requests
                .iter()
                .map(|&(_, from, to)| finder.shortest_path(graph, from, to))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            requests
                .par_iter()
                .map(|&(_, from, to)| finder.shortest_path(graph, from, to))
                .collect()
        }
    }
}
