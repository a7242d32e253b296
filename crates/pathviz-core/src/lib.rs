//! **pathviz-core**: grid model for the pathviz pathfinding demonstrator.
//!
//! This crate owns the data every other pathviz crate speaks in: cell
//! coordinates ([`Pos`]), cell roles ([`Role`]), the grid dimensions
//! ([`GridConfig`]) and the [`Grid`] itself, which stores one role per cell
//! and a 4-directional adjacency list recomputed on demand.
//!
//! Nothing here draws anything. Front ends read roles back from the grid and
//! decide how to render them.

pub mod config;
pub mod geom;
pub mod grid;
pub mod role;

pub use config::GridConfig;
pub use geom::Pos;
pub use grid::{Grid, GridError, GridIter};
pub use role::Role;
