//! Breadth-first and A* search over pathviz grids.
//!
//! Both algorithms run through [`SearchRange`], which owns and reuses the
//! per-run buffers (predecessor links, cost map, frontier queues) so that
//! repeated runs on the same grid allocate nothing after warm-up. Runs report
//! their progress as a stream of [`SearchEvent`]s and finish with an
//! [`Outcome`].
//!
//! - **BFS** ([`SearchRange::bfs_path`]): FIFO frontier, first discovery wins.
//! - **A\*** ([`SearchRange::astar_path`]): Manhattan heuristic, ties on
//!   f-score broken by insertion order.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`AstarPather`] : [`Pather`] | A* |
//!
//! [`pathviz_core::Grid`] implements both.

mod algorithm;
mod astar;
mod bfs;
mod context;
mod event;
mod searchrange;
mod traits;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use context::Context;
pub use event::{Outcome, SearchEvent};
pub use searchrange::SearchRange;
pub use traits::{AstarPather, Pather};
