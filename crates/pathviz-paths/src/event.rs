use pathviz_core::{Pos, Role};

/// A visitation step emitted while a search runs.
///
/// `role` is [`Role::Frontier`] when a cell is discovered and
/// [`Role::Visited`] once it has been expanded. Start and End cells are never
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchEvent {
    pub pos: Pos,
    pub role: Role,
}

impl SearchEvent {
    #[inline]
    pub const fn frontier(pos: Pos) -> Self {
        Self {
            pos,
            role: Role::Frontier,
        }
    }

    #[inline]
    pub const fn visited(pos: Pos) -> Self {
        Self {
            pos,
            role: Role::Visited,
        }
    }
}

/// Terminal result of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Cells from Start (exclusive) to End (inclusive).
    PathFound(Vec<Pos>),
    NoPathFound,
    /// The run's [`Context`](crate::Context) was cancelled before it finished.
    Cancelled,
}

impl Outcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Pos]> {
        match self {
            Outcome::PathFound(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::PathFound(_))
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let ev = SearchEvent::visited(Pos::new(3, 7));
        let json = serde_json::to_string(&ev).unwrap();
        let back: SearchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn outcome_round_trip() {
        let out = Outcome::PathFound(vec![Pos::new(0, 1), Pos::new(0, 2)]);
        let json = serde_json::to_string(&out).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }
}
