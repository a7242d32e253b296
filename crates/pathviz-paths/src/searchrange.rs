use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::{Grid, Pos};

use crate::algorithm::Algorithm;
use crate::context::Context;
use crate::event::{Outcome, SearchEvent};
use crate::traits::AstarPather;

/// Sentinel cost of a cell not reached by the current run.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Cost of every edge. Grids are unweighted.
pub(crate) const STEP_COST: i32 = 1;

pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Internal per-cell search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Priority-queue entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first and, among equal `f`, the earliest pushed.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchRange
// ---------------------------------------------------------------------------

/// Owner of the ephemeral state of a search run.
///
/// Every run bumps a generation counter, which lazily invalidates whatever
/// the previous run left in the node array. Nothing from one run is visible
/// to the next.
pub struct SearchRange {
    pub(crate) rows: i32,
    pub(crate) cols: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) open: BinaryHeap<NodeRef>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Pos>,
}

impl SearchRange {
    /// Create a search range for a `rows`×`cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            nodes: vec![Node::default(); rows as usize * cols as usize],
            generation: 0,
            queue: VecDeque::new(),
            open: BinaryHeap::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create a search range matching `grid`'s dimensions.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Dimensions as `(rows, cols)`.
    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    /// Whether this range covers exactly `grid`'s dimensions.
    #[inline]
    pub fn fits(&self, grid: &Grid) -> bool {
        self.size() == (grid.rows(), grid.cols())
    }

    /// Change dimensions, reallocating the node array only when it grows.
    pub fn resize(&mut self, rows: i32, cols: i32) {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let len = rows as usize * cols as usize;
        self.rows = rows;
        self.cols = cols;
        if len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.generation = 0;
    }

    /// Run `algorithm` from `from` to `to`, reporting each step to `emit`.
    pub fn search<P, F>(
        &mut self,
        algorithm: Algorithm,
        pather: &P,
        from: Pos,
        to: Pos,
        ctx: &Context,
        emit: F,
    ) -> Outcome
    where
        P: AstarPather,
        F: FnMut(SearchEvent),
    {
        log::trace!("{algorithm} search {from} -> {to}");
        let outcome = match algorithm {
            Algorithm::Astar => self.astar_path(pather, from, to, ctx, emit),
            Algorithm::Bfs => self.bfs_path(pather, from, to, ctx, emit),
        };
        log::trace!("{algorithm} search finished: {outcome:?}");
        outcome
    }

    // -----------------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------------

    /// Start a new run: every node of older generations becomes undiscovered.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped around: stale stamps could collide with the new one.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    /// Walk predecessor links back from `goal`, stopping before the start
    /// node, and return the cells in start-to-goal order.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut ci = goal;
        while self.nodes[ci].parent != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Convert a `Pos` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.rows || p.col >= self.cols {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert a flat index back to a `Pos`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Pos {
        let cols = self.cols as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 4, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn resize_smaller_preserves_capacity() {
        let mut sr = SearchRange::new(20, 20);
        let cap = sr.nodes.len();
        sr.resize(5, 5);
        assert_eq!(sr.size(), (5, 5));
        assert_eq!(sr.nodes.len(), cap);
        assert_eq!(sr.idx(Pos::new(4, 4)), Some(24));
        assert_eq!(sr.idx(Pos::new(5, 0)), None);
    }

    #[test]
    fn resize_larger_reallocates() {
        let mut sr = SearchRange::new(2, 2);
        sr.resize(10, 10);
        assert_eq!(sr.nodes.len(), 100);
        assert_eq!(sr.point(99), Pos::new(9, 9));
    }

    #[test]
    fn generation_wraparound_clears_stamps() {
        let mut sr = SearchRange::new(1, 2);
        sr.nodes[1].generation = 1;
        sr.generation = u32::MAX;
        assert_eq!(sr.next_generation(), 1);
        assert_eq!(sr.nodes[1].generation, 0);
    }

    #[test]
    fn fits_grid() {
        let grid = Grid::create(3, 4).unwrap();
        let sr = SearchRange::for_grid(&grid);
        assert!(sr.fits(&grid));
        assert!(!SearchRange::new(4, 3).fits(&grid));
    }
}
