//! Session controller for the pathviz demonstrator.
//!
//! A [`Session`] owns the grid, remembers where Start and End are, and turns
//! discrete [`Command`]s into grid mutations and search runs. Front ends feed
//! it commands one at a time and read the grid back for rendering.

mod command;
mod session;

pub use command::{Command, Response, RunReport};
pub use session::{Session, SessionError};
