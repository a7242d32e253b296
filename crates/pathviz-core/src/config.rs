//! Grid dimensions: [`GridConfig`].

use crate::grid::GridError;

/// Fixed grid dimensions supplied at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
}

impl GridConfig {
    pub const DEFAULT_ROWS: i32 = 20;
    pub const DEFAULT_COLS: i32 = 40;
    /// Largest accepted row or column count.
    pub const MAX_DIM: i32 = 1024;

    /// Validate and build a configuration. Both dimensions must lie in
    /// `1..=MAX_DIM`.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        let valid = 1..=Self::MAX_DIM;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows.max(0) as usize) * (self.cols.max(0) as usize)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
        }
    }
}
