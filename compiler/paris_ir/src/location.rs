//! Source locations for diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a declaration was written: source file and 1-based line.
///
/// Ordered by file then line so diagnostics sort in source order.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Location {
            file: file.into(),
            line,
        }
    }

    /// Location for declarations with no source (e.g. synthesized defaults).
    pub fn unknown() -> Self {
        Location::default()
    }

    /// Check whether this location points at real source.
    pub fn is_known(&self) -> bool {
        !self.file.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "<unknown>")
        }
    }
}
