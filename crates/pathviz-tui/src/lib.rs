//! **pathviz-tui**: terminal front end plumbing for pathviz.
//!
//! Provides the pieces a front end needs around the core: input messages
//! ([`Msg`]), a role palette ([`style`]), a character screen buffer with
//! frame diffing ([`Screen`], [`Frame`]), the Model-View-Update loop with a
//! fixed tick ([`App`]), and a crossterm [`Driver`] ([`CrosstermDriver`]).

pub mod app;
pub mod messages;
pub mod screen;
pub mod style;
pub mod term;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use messages::{Key, MouseAction, Msg};
pub use screen::{Frame, FrameCell, Glyph, Screen, compute_frame};
pub use style::{Color, Style, role_style};
pub use term::CrosstermDriver;
