//! Grid adjacency graph.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format.  Nodes are the
//! grid's row-major `CellId`s, including blocked ones, so a node id can be
//! converted back to a `Cell` without a lookup table.  Given a `CellId n`,
//! its neighbours occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Blocked (or transiently blocked) cells have no edges in or out.
//!
//! # Neighbour order
//!
//! Each open cell lists its open neighbours in a fixed order: east, south,
//! west, north.  Routing ties are broken by discovery order, so this order is
//! what decides between equal-length paths.

use std::collections::HashSet;

use fleet_core::{Cell, CellId};

use crate::grid::Grid;

/// `(d_row, d_col)` offsets in neighbour order: east, south, west, north.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

// ── GridGraph ─────────────────────────────────────────────────────────────────

/// 4-connected graph over the open cells of a [`Grid`].
///
/// Rebuilt from scratch whenever the set of transient obstacles changes;
/// building twice from the same inputs yields an identical graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    rows: u32,
    cols: u32,
    /// `open[n]` is `false` for persistently or transiently blocked cells.
    open: Vec<bool>,

    /// CSR row pointer.  Neighbours of node `n` are at
    /// `edge_to[node_out_start[n] .. node_out_start[n+1]]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Neighbour cell of each directed edge, grouped by source node.
    pub edge_to: Vec<CellId>,
}

impl GridGraph {
    /// Build the adjacency graph of `grid`, treating every cell in
    /// `transient` as blocked in addition to the grid's own obstacles.
    ///
    /// Transient cells outside the grid are ignored.
    pub fn build(grid: &Grid, transient: &HashSet<Cell>) -> GridGraph {
        let rows = grid.rows();
        let cols = grid.cols();
        let n = grid.cell_count();

        let open: Vec<bool> = grid
            .cells()
            .map(|(cell, kind)| !kind.is_blocked() && !transient.contains(&cell))
            .collect();

        let mut node_out_start = Vec::with_capacity(n + 1);
        let mut edge_to = Vec::with_capacity(n * 4);

        for idx in 0..n {
            node_out_start.push(edge_to.len() as u32);
            if !open[idx] {
                continue;
            }
            let cell = grid.cell_at(CellId(idx as u32));
            for (dr, dc) in NEIGHBOR_OFFSETS {
                let Some(next) = cell.offset(dr, dc) else { continue };
                if let Some(id) = grid.cell_id(next) {
                    if open[id.index()] {
                        edge_to.push(id);
                    }
                }
            }
        }
        node_out_start.push(edge_to.len() as u32);

        GridGraph { rows, cols, open, node_out_start, edge_to }
    }

    /// Graph of `grid` with no transient obstacles.
    pub fn from_grid(grid: &Grid) -> GridGraph {
        GridGraph::build(grid, &HashSet::new())
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of nodes, open or not (= grid cell count).
    pub fn node_count(&self) -> usize {
        self.open.len()
    }

    /// Number of directed edges.  Every adjacency appears twice.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Open neighbours of `node` in east, south, west, north order.
    #[inline]
    pub fn neighbors(&self, node: CellId) -> &[CellId] {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        &self.edge_to[start..end]
    }

    #[inline]
    pub fn out_degree(&self, node: CellId) -> usize {
        self.neighbors(node).len()
    }

    /// `true` if `cell` is in bounds and not blocked.
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.cell_id(cell).is_some_and(|id| self.open[id.index()])
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    #[inline]
    pub fn cell_id(&self, cell: Cell) -> Option<CellId> {
        (cell.row < self.rows && cell.col < self.cols)
            .then(|| CellId(cell.row * self.cols + cell.col))
    }

    #[inline]
    pub fn cell_at(&self, id: CellId) -> Cell {
        Cell::new(id.0 / self.cols, id.0 % self.cols)
    }
}
