//! The two legislative houses.

use std::fmt;

/// One of the two chambers of Parliament.
///
/// The upstream APIs have disjoint schemas per chamber (division tallies,
/// member URL shapes), so most decoding branches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chamber {
    Commons,
    Lords,
}

impl Chamber {
    /// Upstream display name, as used by the members-query API.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Commons => "Commons",
            Self::Lords => "Lords",
        }
    }

    /// Lowercase prefix used by the linked-data division endpoints
    /// (`commonsdivisions.json`, `lordsdivisions.json`).
    pub(crate) const fn path_prefix(self) -> &'static str {
        match self {
            Self::Commons => "commons",
            Self::Lords => "lords",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
