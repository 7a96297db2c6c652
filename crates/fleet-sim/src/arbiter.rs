//! Per-tick movement arbitration.
//!
//! # Protocol
//!
//! Every agent submits an [`Intent`].  Agents that are not contending (waiting,
//! replanning, reached) claim their current cell up front.  Contending agents
//! are then processed one by one in [`ArbitrationOrder`]; each is checked
//! against a fresh [`ReservationTable`]:
//!
//! | Check | Denied when                                                   | Reason      |
//! |-------|---------------------------------------------------------------|-------------|
//! | 1     | an earlier agent already reserved the destination             | `Reserved`  |
//! | 2     | the destination's previous occupant moved into our cell       | `Swap`      |
//! | 3     | the destination is occupied by an agent that has not left it  | `Occupied`  |
//!
//! An allowed agent reserves its destination and vacates its origin; a
//! denied agent keeps (reserves) its origin.  A denied agent is not retried
//! within the tick.
//!
//! Check 3 is what keeps the no-overlap invariant for agents that stay put.
//! It also means a follower processed before its leader is denied and loses
//! one tick, even though the leader is about to vacate the cell.
//! Because a cell can only be entered after its occupant has left, check 2
//! never fires through [`ReservationArbiter`]; it guards the table when it is
//! driven without occupancy information.

use fleet_core::{AgentId, Cell};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Cell, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Cell, V>;

// ── Intent ────────────────────────────────────────────────────────────────────

/// One agent's desired move for the current tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Intent {
    pub agent:      AgentId,
    pub from:       Cell,
    pub to:         Cell,
    /// `false` for agents that are not `Moving`; their `to` equals `from`.
    pub contending: bool,
}

impl Intent {
    /// A `Moving` agent's request to go from `from` to `to`.
    pub fn step(agent: AgentId, from: Cell, to: Cell) -> Self {
        Self { agent, from, to, contending: true }
    }

    /// A non-moving agent holding `at`.
    pub fn stay(agent: AgentId, at: Cell) -> Self {
        Self { agent, from: at, to: at, contending: false }
    }

    #[inline]
    pub fn is_hold(&self) -> bool {
        self.from == self.to
    }
}

// ── Verdict ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DenyReason {
    /// Destination already claimed this tick.
    Reserved { by: AgentId },
    /// Moving would exchange cells with `with`.
    Swap { with: AgentId },
    /// Destination still occupied by `by`.
    Occupied { by: AgentId },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Verdict {
    Allowed,
    Denied(DenyReason),
}

impl Verdict {
    #[inline]
    pub fn is_allowed(self) -> bool {
        self == Verdict::Allowed
    }
}

/// The arbiter's decision for one intent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Ruling {
    pub intent:  Intent,
    pub verdict: Verdict,
}

// ── ArbitrationOrder ──────────────────────────────────────────────────────────

/// Order in which contending agents claim cells.  Earlier agents win ties.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ArbitrationOrder {
    #[default]
    AscendingId,
    DescendingId,
}

// ── ReservationTable ──────────────────────────────────────────────────────────

/// Per-tick claim table.  Built fresh for each tick and discarded after.
#[derive(Clone, Debug, Default)]
pub struct ReservationTable {
    /// Destination cell → the single agent that claimed it.
    reserved: CellMap<AgentId>,
    /// Origin cell → (agent that left it, where it went).
    vacated:  CellMap<(AgentId, Cell)>,
    /// Cell → agent standing on it at the start of the tick.
    occupied: CellMap<AgentId>,
}

impl ReservationTable {
    /// Table seeded with every agent's position at the start of the tick.
    pub fn with_occupants(occupants: impl IntoIterator<Item = (Cell, AgentId)>) -> Self {
        Self {
            occupied: occupants.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Unconditionally claim `cell` for `agent`.
    pub fn reserve(&mut self, cell: Cell, agent: AgentId) {
        self.reserved.insert(cell, agent);
    }

    pub fn claimant(&self, cell: Cell) -> Option<AgentId> {
        self.reserved.get(&cell).copied()
    }

    /// Try to move `agent` from `from` to `to`.  On success the destination
    /// is reserved and the origin recorded as vacated; on denial nothing
    /// changes.
    pub fn try_claim(&mut self, agent: AgentId, from: Cell, to: Cell) -> Verdict {
        if let Some(by) = self.claimant(to) {
            return Verdict::Denied(DenyReason::Reserved { by });
        }
        if let Some(&(with, dest)) = self.vacated.get(&to) {
            if dest == from {
                return Verdict::Denied(DenyReason::Swap { with });
            }
        }
        if let Some(&by) = self.occupied.get(&to) {
            if by != agent && !self.vacated.contains_key(&to) {
                return Verdict::Denied(DenyReason::Occupied { by });
            }
        }
        self.reserved.insert(to, agent);
        self.vacated.insert(from, (agent, to));
        Verdict::Allowed
    }

    /// Number of cells claimed so far.
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

// ── ConflictArbiter trait ─────────────────────────────────────────────────────

/// Pluggable movement arbitration.
///
/// Implementations read intents and return one [`Ruling`] per intent; they
/// must not depend on anything but their inputs, so the same intents always
/// yield the same rulings.
pub trait ConflictArbiter: Send + Sync {
    fn resolve(&self, intents: &[Intent]) -> Vec<Ruling>;
}

// ── ReservationArbiter ────────────────────────────────────────────────────────

/// Greedy first-claim-wins arbiter over a [`ReservationTable`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ReservationArbiter {
    pub order: ArbitrationOrder,
}

impl ReservationArbiter {
    pub fn new(order: ArbitrationOrder) -> Self {
        Self { order }
    }
}

impl ConflictArbiter for ReservationArbiter {
    /// Rulings are returned in processing order: non-contending agents first
    /// (always allowed), then contending agents in `self.order`.
    fn resolve(&self, intents: &[Intent]) -> Vec<Ruling> {
        let mut table = ReservationTable::with_occupants(intents.iter().map(|i| (i.from, i.agent)));
        let mut rulings = Vec::with_capacity(intents.len());

        for intent in intents.iter().filter(|i| !i.contending) {
            table.reserve(intent.from, intent.agent);
            rulings.push(Ruling { intent: *intent, verdict: Verdict::Allowed });
        }

        let mut contending: Vec<&Intent> = intents.iter().filter(|i| i.contending).collect();
        match self.order {
            ArbitrationOrder::AscendingId  => contending.sort_by_key(|i| i.agent),
            ArbitrationOrder::DescendingId => contending.sort_by_key(|i| std::cmp::Reverse(i.agent)),
        }

        for intent in contending {
            let verdict = if intent.is_hold() {
                table.reserve(intent.from, intent.agent);
                Verdict::Allowed
            } else {
                let v = table.try_claim(intent.agent, intent.from, intent.to);
                if !v.is_allowed() {
                    table.reserve(intent.from, intent.agent);
                }
                v
            };
            rulings.push(Ruling { intent: *intent, verdict });
        }

        rulings
    }
}
