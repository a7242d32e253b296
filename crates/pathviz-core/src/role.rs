//! The [`Role`] type: what a cell currently is.

use std::fmt;

/// Functional classification of a grid cell.
///
/// Roles carry no visual information; front ends pick their own colours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered by a search but not yet expanded.
    Frontier,
    /// Fully expanded by a search.
    Visited,
    /// Part of the last path found.
    Path,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Empty,
        Role::Start,
        Role::End,
        Role::Barrier,
        Role::Frontier,
        Role::Visited,
        Role::Path,
    ];

    /// Whether the role is one of the two exclusive endpoint markers.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Role::Start | Role::End)
    }

    /// Whether the role is a marking left behind by a search run.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Role::Frontier | Role::Visited | Role::Path)
    }

    /// Whether searches may step onto a cell with this role.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Role::Barrier)
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Empty => "empty",
            Role::Start => "start",
            Role::End => "end",
            Role::Barrier => "barrier",
            Role::Frontier => "frontier",
            Role::Visited => "visited",
            Role::Path => "path",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
