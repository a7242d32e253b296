use pathviz_core::{Grid, Pos};

/// Minimal search interface: provides neighbour enumeration.
pub trait Pather {
    /// Append neighbours of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with an admissible heuristic, required by A*.
pub trait AstarPather: Pather {
    /// Estimated number of steps from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

/// Walks the grid's cached adjacency. The grid must have been refreshed since
/// its last barrier edit.
impl Pather for Grid {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend_from_slice(Grid::neighbors(self, p));
    }
}

/// Manhattan distance, exact on an open grid.
impl AstarPather for Grid {
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        from.manhattan(to)
    }
}
