use std::fmt;

use pathviz_core::{Pos, Role};
use pathviz_paths::{Algorithm, Outcome, SearchEvent};

/// A user command, processed to completion before the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    SetStart(Pos),
    SetEnd(Pos),
    /// Mark the cell as a barrier.
    ToggleBarrier(Pos),
    ClearCell(Pos),
    SelectAlgorithm(Algorithm),
    Run,
    ResetGrid,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetStart(p) => write!(f, "set-start {p}"),
            Self::SetEnd(p) => write!(f, "set-end {p}"),
            Self::ToggleBarrier(p) => write!(f, "barrier {p}"),
            Self::ClearCell(p) => write!(f, "clear {p}"),
            Self::SelectAlgorithm(a) => write!(f, "select {a}"),
            Self::Run => f.write_str("run"),
            Self::ResetGrid => f.write_str("reset"),
        }
    }
}

/// What a successfully processed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Applied,
    /// The command had nothing to act on (Run without both endpoints).
    Ignored,
    Ran(RunReport),
}

/// Result of a search run, including everything a front end needs to animate
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub start: Pos,
    pub end: Pos,
    pub outcome: Outcome,
    /// Visitation events in emission order.
    pub events: Vec<SearchEvent>,
}

impl RunReport {
    /// Number of edges in the path, if one was found.
    pub fn path_len(&self) -> Option<usize> {
        self.outcome.path().map(<[Pos]>::len)
    }

    /// Number of cells expanded.
    pub fn visited_count(&self) -> usize {
        self.events.iter().filter(|e| e.role == Role::Visited).count()
    }
}
