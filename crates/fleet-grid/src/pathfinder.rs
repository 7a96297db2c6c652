//! Path-finding trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `fleet-sim` routes through the [`PathFinder`] trait, so alternative
//! searches (A*, jump-point search) can be dropped in without touching the
//! tick loop.  Edge weights are uniform, so the default
//! [`DijkstraPathFinder`] degenerates to a breadth-first search with a
//! deterministic tie-break.
//!
//! # Determinism
//!
//! Frontier entries are keyed `(distance, insertion sequence)`: among cells at
//! equal distance, the one discovered first is expanded first.  Combined with
//! the graph's fixed neighbour order this makes every query's path a pure
//! function of the grid and the endpoints.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use fleet_core::{Cell, CellId};

use crate::graph::GridGraph;
use crate::grid::Grid;
use crate::{GridError, GridResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// Ordered, non-empty sequence of orthogonally adjacent cells from a query's
/// start (first) to its goal (last).
///
/// Owned by the agent that requested it and replaced wholesale on replan.
/// Serialized as the bare cell list; decoding goes through the same checks
/// as [`Path::from_cells`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Cell>", into = "Vec<Cell>"))]
pub struct Path {
    cells: Vec<Cell>,
}

impl TryFrom<Vec<Cell>> for Path {
    type Error = GridError;

    fn try_from(cells: Vec<Cell>) -> GridResult<Path> {
        if cells.is_empty() {
            return Err(GridError::Parse("empty path".into()));
        }
        if let Some(w) = cells.windows(2).find(|w| !w[0].is_adjacent(w[1])) {
            return Err(GridError::Parse(format!(
                "path steps from {} to {}, which are not adjacent",
                w[0], w[1]
            )));
        }
        Ok(Path { cells })
    }
}

impl From<Path> for Vec<Cell> {
    fn from(path: Path) -> Self {
        path.cells
    }
}

impl Path {
    /// Wrap an explicit cell sequence.  Returns `None` if `cells` is empty or
    /// any two consecutive cells are not orthogonally adjacent.
    pub fn from_cells(cells: Vec<Cell>) -> Option<Path> {
        Path::try_from(cells).ok()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, start and goal included.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves needed to walk the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    #[inline]
    pub fn get(&self, step: usize) -> Option<Cell> {
        self.cells.get(step).copied()
    }

    /// `true` if start and goal are the same cell.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-source, single-target path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve parallel
/// replanning searches against a shared, immutable [`GridGraph`].
pub trait PathFinder: Send + Sync {
    /// Shortest path from `start` to `goal` over `graph`.
    ///
    /// Returns [`GridError::Unreachable`] when no path exists, including when
    /// either endpoint is out of bounds or blocked.  `start == goal` on an
    /// open cell yields a single-cell path.
    fn shortest_path(&self, graph: &GridGraph, start: Cell, goal: Cell) -> GridResult<Path>;

    /// Shortest path treating `transient` cells as blocked for this query
    /// only.
    ///
    /// `base` must be the obstacle-free graph of `grid`; it is reused as-is
    /// when `transient` is empty, otherwise a fresh graph is derived and
    /// dropped after the search.
    fn shortest_path_avoiding(
        &self,
        grid: &Grid,
        base: &GridGraph,
        start: Cell,
        goal: Cell,
        transient: &HashSet<Cell>,
    ) -> GridResult<Path> {
        if transient.is_empty() {
            self.shortest_path(base, start, goal)
        } else {
            let graph = GridGraph::build(grid, transient);
            self.shortest_path(&graph, start, goal)
        }
    }
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Uniform-cost search over the CSR grid graph.
///
/// Every edge costs 1.  The search stops as soon as the goal is popped from
/// the frontier.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn shortest_path(&self, graph: &GridGraph, start: Cell, goal: Cell) -> GridResult<Path> {
        dijkstra(graph, start, goal)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(graph: &GridGraph, start: Cell, goal: Cell) -> GridResult<Path> {
    let unreachable = GridError::Unreachable { from: start, to: goal };

    if !graph.is_open(start) || !graph.is_open(goal) {
        return Err(unreachable);
    }
    let (Some(from), Some(to)) = (graph.cell_id(start), graph.cell_id(goal)) else {
        return Err(unreachable);
    };
    if from == to {
        return Ok(Path { cells: vec![start] });
    }

    let n = graph.node_count();
    let mut dist   = vec![u32::MAX; n];
    // parent[v] = node that reached v; CellId::INVALID for unreached nodes.
    let mut parent = vec![CellId::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap on (cost, seq).  `seq` increases with every push, so equal
    // costs pop in discovery order.
    let mut seq: u64 = 0;
    let mut heap: BinaryHeap<Reverse<(u32, u64, CellId)>> = BinaryHeap::new();
    heap.push(Reverse((0, seq, from)));

    while let Some(Reverse((cost, _, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &parent, from, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for &neighbor in graph.neighbors(node) {
            let new_cost = cost + 1;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                parent[neighbor.index()] = node;
                seq += 1;
                heap.push(Reverse((new_cost, seq, neighbor)));
            }
        }
    }

    Err(unreachable)
}

fn reconstruct(graph: &GridGraph, parent: &[CellId], from: CellId, to: CellId) -> Path {
    let mut cells = vec![graph.cell_at(to)];
    let mut cur = to;
    while cur != from {
        cur = parent[cur.index()];
        cells.push(graph.cell_at(cur));
    }
    cells.reverse();
    Path { cells }
}
