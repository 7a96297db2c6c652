//! Core agent storage: `AgentStore` (SoA data and state transitions).
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let here = store.position[agent.index()];
//! ```
//!
//! Ids are assigned densely in setup order, so iterating `agent_ids()` is
//! iterating in ascending id order, which is the arbitration order.
//!
//! The transition methods below are the only writers of `state`,
//! `wait_budget`, `path` and `step` during a run; the tick loop in
//! `fleet-sim` decides *when* to call them.

use fleet_core::{AgentId, Cell};
use fleet_grid::{GridResult, Path};

use crate::state::AgentState;

// ── AgentView ─────────────────────────────────────────────────────────────────

/// Read-only per-agent snapshot handed to presentation sinks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:          AgentId,
    pub symbol:      char,
    pub position:    Cell,
    pub goal:        Cell,
    pub state:       AgentState,
    /// Remaining wait ticks; zero unless `state == Waiting`.
    pub wait_budget: u32,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Do not construct directly; use [`AgentStoreBuilder`](crate::AgentStoreBuilder),
/// which validates endpoints and computes every agent's initial path.
#[derive(Clone, Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Display symbol (`A`, `B`, … unless given explicitly).
    pub symbol: Vec<char>,

    /// Current cell.
    pub position: Vec<Cell>,

    /// Goal cell.  Never changes after setup.
    pub goal: Vec<Cell>,

    /// Current route.  `None` only after a replan found no path.
    pub path: Vec<Option<Path>>,

    /// Index of `position` within `path`.
    pub step: Vec<usize>,

    pub state: Vec<AgentState>,

    /// Remaining wait ticks while `Waiting`.
    pub wait_budget: Vec<u32>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// `true` if `agent` names an agent in this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    #[inline]
    pub fn state_of(&self, agent: AgentId) -> AgentState {
        self.state[agent.index()]
    }

    /// Snapshot of one agent.
    pub fn view(&self, agent: AgentId) -> AgentView {
        let i = agent.index();
        AgentView {
            id:          agent,
            symbol:      self.symbol[i],
            position:    self.position[i],
            goal:        self.goal[i],
            state:       self.state[i],
            wait_budget: self.remaining_wait(agent),
        }
    }

    /// Snapshots of all agents in ascending id order.
    pub fn views(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agent_ids().map(|a| self.view(a))
    }

    #[inline]
    pub fn remaining_wait(&self, agent: AgentId) -> u32 {
        match self.state[agent.index()] {
            AgentState::Waiting => self.wait_budget[agent.index()],
            _ => 0,
        }
    }

    pub fn all_reached(&self) -> bool {
        self.state.iter().all(|s| s.is_terminal())
    }

    pub fn count_in(&self, state: AgentState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Cell the agent wants to occupy after this tick.
    ///
    /// The next path cell for a `Moving` agent with steps left; the current
    /// cell in every other case.
    pub fn intent(&self, agent: AgentId) -> Cell {
        let i = agent.index();
        let here = self.position[i];
        if self.state[i] != AgentState::Moving {
            return here;
        }
        self.path[i]
            .as_ref()
            .and_then(|p| p.get(self.step[i] + 1))
            .unwrap_or(here)
    }

    /// Apply an approved move to the next path cell.
    pub fn advance(&mut self, agent: AgentId) {
        let i = agent.index();
        if let Some(next) = self.path[i].as_ref().and_then(|p| p.get(self.step[i] + 1)) {
            self.step[i] += 1;
            self.position[i] = next;
        }
    }

    /// Arbiter denial: wait `budget` ticks before trying again.
    pub fn deny(&mut self, agent: AgentId, budget: u32) {
        let i = agent.index();
        self.state[i] = AgentState::Waiting;
        self.wait_budget[i] = budget;
    }

    /// If at the goal and not yet `Reached`, mark it `Reached`.  Returns
    /// `true` on that transition.
    pub fn mark_reached(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        if self.state[i] != AgentState::Reached && self.position[i] == self.goal[i] {
            self.state[i] = AgentState::Reached;
            true
        } else {
            false
        }
    }

    // ── Waiting ───────────────────────────────────────────────────────────

    /// Count one tick off a `Waiting` agent's budget.
    ///
    /// When the budget hits zero the agent resumes: `Moving` if it still has
    /// a path, `Replanning` if its last replan failed.  Returns the new state
    /// on that transition, `None` otherwise.
    pub fn tick_wait(&mut self, agent: AgentId) -> Option<AgentState> {
        let i = agent.index();
        if self.state[i] != AgentState::Waiting {
            return None;
        }
        self.wait_budget[i] = self.wait_budget[i].saturating_sub(1);
        if self.wait_budget[i] > 0 {
            return None;
        }
        let next = if self.path[i].is_some() {
            AgentState::Moving
        } else {
            AgentState::Replanning
        };
        self.state[i] = next;
        Some(next)
    }

    // ── Replanning ────────────────────────────────────────────────────────

    /// Enter `Replanning`.  Returns `false` (and changes nothing) if the
    /// agent has already reached its goal.
    pub fn begin_replan(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        if self.state[i].is_terminal() {
            return false;
        }
        self.state[i] = AgentState::Replanning;
        self.wait_budget[i] = 0;
        true
    }

    /// Install the outcome of a replanning search.
    ///
    /// A found path replaces the old one wholesale and the agent resumes
    /// `Moving` from step 0.  An unreachable goal drops the path and parks
    /// the agent in `Waiting` for `retry_budget` ticks.  Returns `true` if a
    /// path was installed.
    pub fn apply_route(&mut self, agent: AgentId, route: GridResult<Path>, retry_budget: u32) -> bool {
        let i = agent.index();
        match route {
            Ok(path) => {
                self.path[i] = Some(path);
                self.step[i] = 0;
                self.state[i] = AgentState::Moving;
                self.wait_budget[i] = 0;
                true
            }
            Err(_) => {
                self.path[i] = None;
                self.step[i] = 0;
                self.state[i] = AgentState::Waiting;
                self.wait_budget[i] = retry_budget;
                false
            }
        }
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(symbols: Vec<char>, paths: Vec<Path>) -> Self {
        let count = paths.len();
        Self {
            count,
            symbol:      symbols,
            position:    paths.iter().map(Path::start).collect(),
            goal:        paths.iter().map(Path::goal).collect(),
            path:        paths.into_iter().map(Some).collect(),
            step:        vec![0; count],
            state:       vec![AgentState::Moving; count],
            wait_budget: vec![0; count],
        }
    }
}
