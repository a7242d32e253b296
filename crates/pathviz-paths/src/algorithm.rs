use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The interchangeable search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Astar,
    Bfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Astar, Algorithm::Bfs];

    /// Display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Astar => "A*",
            Self::Bfs => "BFS",
        }
    }

    /// The other algorithm.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Astar => Self::Bfs,
            Self::Bfs => Self::Astar,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a name matches no [`Algorithm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?} (expected \"A*\" or \"BFS\")")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(Self::Astar),
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
