//! The [`Grid`] type: a fixed ROWS×COLS array of cell [`Role`]s plus the
//! 4-directional adjacency searches walk over.
//!
//! Adjacency is derivative state. Any mutation that adds or removes a
//! [`Role::Barrier`] marks it stale, and [`Grid::refresh_adjacency`] must run
//! before the neighbour lists are trusted again.

use log::trace;
use thiserror::Error;

use crate::config::GridConfig;
use crate::geom::Pos;
use crate::role::Role;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised by grid operations. A failing call never mutates the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A dimension is below 1 or above [`GridConfig::MAX_DIM`].
    #[error(
        "invalid grid dimensions {rows}x{cols}: each must be between 1 and {max}",
        max = GridConfig::MAX_DIM
    )]
    InvalidDimensions { rows: i32, cols: i32 },
    /// A coordinate outside `0..rows` × `0..cols`.
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: i32, cols: i32 },
    /// The role change is not allowed from the cell's current role.
    #[error("cannot change cell {pos} from {from} to {to}")]
    InvalidTransition { pos: Pos, from: Role, to: Role },
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size grid of cell roles.
///
/// Cells are never added or removed; only their roles change. Storage is
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    config: GridConfig,
    roles: Vec<Role>,
    adjacency: Vec<Vec<Pos>>,
    stale: bool,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell [`Role::Empty`].
    ///
    /// Adjacency starts out stale; call [`refresh_adjacency`](Grid::refresh_adjacency)
    /// before searching.
    pub fn new(config: GridConfig) -> Self {
        let len = config.len();
        Self {
            config,
            roles: vec![Role::Empty; len],
            adjacency: vec![Vec::new(); len],
            stale: true,
        }
    }

    /// Validate `rows`/`cols` and create an empty grid.
    pub fn create(rows: i32, cols: i32) -> Result<Self, GridError> {
        Ok(Self::new(GridConfig::new(rows, cols)?))
    }

    /// A fresh grid of the same dimensions: all roles and adjacency discarded.
    pub fn reset(&self) -> Self {
        Self::new(self.config)
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.config.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.config.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.config.rows && p.col < self.config.cols
    }

    /// Flat row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.config.cols as usize + p.col as usize)
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let cols = self.config.cols as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            rows: self.config.rows,
            cols: self.config.cols,
        })
    }

    /// Current role of the cell at `p`.
    pub fn role(&self, p: Pos) -> Result<Role, GridError> {
        Ok(self.roles[self.checked_index(p)?])
    }

    /// All roles in row-major order.
    #[inline]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Set the role of the cell at `p`, returning the previous role.
    ///
    /// Fails with [`GridError::OutOfBounds`] for coordinates outside the grid
    /// and with [`GridError::InvalidTransition`] when turning a Start cell into
    /// End or vice versa. Uniqueness of Start/End is the caller's concern.
    pub fn set_role(&mut self, p: Pos, role: Role) -> Result<Role, GridError> {
        let i = self.checked_index(p)?;
        let from = self.roles[i];
        if matches!((from, role), (Role::Start, Role::End) | (Role::End, Role::Start)) {
            return Err(GridError::InvalidTransition { pos: p, from, to: role });
        }
        if from != role && (from == Role::Barrier || role == Role::Barrier) {
            self.stale = true;
        }
        self.roles[i] = role;
        trace!("cell {p}: {from} -> {role}");
        Ok(from)
    }

    /// Whether a barrier was added or removed since the last refresh.
    #[inline]
    pub fn is_adjacency_stale(&self) -> bool {
        self.stale
    }

    /// Recompute every non-barrier cell's neighbour list.
    ///
    /// Neighbours are the in-bounds, non-barrier cells among down, up, right
    /// and left, in that order. Barrier cells get an empty list.
    pub fn refresh_adjacency(&mut self) {
        let cols = self.config.cols as usize;
        for i in 0..self.roles.len() {
            let p = Pos::new((i / cols) as i32, (i % cols) as i32);
            let mut list = std::mem::take(&mut self.adjacency[i]);
            list.clear();
            if self.roles[i].is_passable() {
                for n in p.neighbors_4() {
                    if let Some(ni) = self.index(n) {
                        if self.roles[ni].is_passable() {
                            list.push(n);
                        }
                    }
                }
            }
            self.adjacency[i] = list;
        }
        self.stale = false;
    }

    /// Neighbour list of `p` as of the last refresh. Empty for out-of-bounds
    /// cells.
    pub fn neighbors(&self, p: Pos) -> &[Pos] {
        match self.index(p) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    /// Reset every Frontier, Visited and Path cell to Empty. Returns how many
    /// cells changed.
    pub fn clear_search_marks(&mut self) -> usize {
        let mut n = 0;
        for r in self.roles.iter_mut().filter(|r| r.is_search_mark()) {
            *r = Role::Empty;
            n += 1;
        }
        n
    }

    /// Row-major iterator over `(Pos, Role)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { grid: self, idx: 0 }
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Pos, Role)` pairs of a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    idx: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Pos, Role);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let role = *self.grid.roles.get(self.idx)?;
        let p = self.grid.pos(self.idx);
        self.idx += 1;
        Some((p, role))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.grid.roles.len() - self.idx;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Pos, Role);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: i32, cols: i32) -> Grid {
        Grid::create(rows, cols).unwrap()
    }

    #[test]
    fn create_all_empty() {
        let g = grid(3, 4);
        assert_eq!(g.len(), 12);
        assert!(g.iter().all(|(_, r)| r == Role::Empty));
        assert!(g.is_adjacency_stale());
        assert_eq!(
            Grid::create(0, 3),
            Err(GridError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn index_round_trip() {
        let g = grid(3, 5);
        for (i, (p, _)) in g.iter().enumerate() {
            assert_eq!(g.index(p), Some(i));
            assert_eq!(g.pos(i), p);
        }
        assert_eq!(g.index(Pos::new(3, 0)), None);
        assert_eq!(g.index(Pos::new(0, -1)), None);
    }

    #[test]
    fn set_role_out_of_bounds_rejected() {
        let mut g = grid(2, 2);
        let err = g.set_role(Pos::new(2, 0), Role::Barrier).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                pos: Pos::new(2, 0),
                rows: 2,
                cols: 2
            }
        );
        assert!(g.iter().all(|(_, r)| r == Role::Empty));
        assert!(g.role(Pos::new(-1, 0)).is_err());
    }

    #[test]
    fn start_end_swap_rejected() {
        let mut g = grid(2, 2);
        let p = Pos::new(0, 0);
        g.set_role(p, Role::Start).unwrap();
        let err = g.set_role(p, Role::End).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidTransition {
                pos: p,
                from: Role::Start,
                to: Role::End
            }
        );
        assert_eq!(g.role(p), Ok(Role::Start));

        let q = Pos::new(1, 1);
        g.set_role(q, Role::End).unwrap();
        assert!(g.set_role(q, Role::Start).is_err());
        assert_eq!(g.role(q), Ok(Role::End));
    }

    #[test]
    fn adjacency_excludes_barriers_and_edges() {
        let mut g = grid(3, 3);
        g.set_role(Pos::new(0, 1), Role::Barrier).unwrap();
        g.refresh_adjacency();
        assert!(!g.is_adjacency_stale());

        // Corner: down only (right is a barrier).
        assert_eq!(g.neighbors(Pos::new(0, 0)), &[Pos::new(1, 0)]);
        // Centre: down, right, left (up is a barrier).
        assert_eq!(
            g.neighbors(Pos::new(1, 1)),
            &[Pos::new(2, 1), Pos::new(1, 2), Pos::new(1, 0)]
        );
        // Barrier cells have no neighbours.
        assert!(g.neighbors(Pos::new(0, 1)).is_empty());
        assert!(g.neighbors(Pos::new(9, 9)).is_empty());
    }

    #[test]
    fn barrier_edits_mark_adjacency_stale() {
        let mut g = grid(2, 2);
        g.refresh_adjacency();
        g.set_role(Pos::new(0, 0), Role::Start).unwrap();
        assert!(!g.is_adjacency_stale());

        g.set_role(Pos::new(1, 1), Role::Barrier).unwrap();
        assert!(g.is_adjacency_stale());
        g.refresh_adjacency();

        g.set_role(Pos::new(1, 1), Role::Empty).unwrap();
        assert!(g.is_adjacency_stale());
        g.refresh_adjacency();
        assert_eq!(
            g.neighbors(Pos::new(0, 1)),
            &[Pos::new(1, 1), Pos::new(0, 0)]
        );
    }

    #[test]
    fn clear_search_marks_keeps_other_roles() {
        let mut g = grid(1, 5);
        let roles = [Role::Start, Role::Frontier, Role::Visited, Role::Path, Role::Barrier];
        for (c, r) in roles.into_iter().enumerate() {
            g.set_role(Pos::new(0, c as i32), r).unwrap();
        }
        assert_eq!(g.clear_search_marks(), 3);
        assert_eq!(
            g.roles(),
            &[Role::Start, Role::Empty, Role::Empty, Role::Empty, Role::Barrier]
        );
    }

    #[test]
    fn reset_discards_roles() {
        let mut g = grid(2, 3);
        g.set_role(Pos::new(1, 2), Role::End).unwrap();
        g.refresh_adjacency();
        let fresh = g.reset();
        assert_eq!(fresh.config(), g.config());
        assert!(fresh.iter().all(|(_, r)| r == Role::Empty));
        assert!(fresh.is_adjacency_stale());
        assert!(fresh.neighbors(Pos::new(0, 0)).is_empty());
        assert_eq!(g.role(Pos::new(1, 2)), Ok(Role::End));
    }
}
