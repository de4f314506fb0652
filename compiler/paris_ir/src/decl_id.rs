//! Declaration IDs.
//!
//! Every declaration seen in a round (local or folded in from a dependency
//! manifest) lives in the round's `DeclArena` and is addressed by a `DeclId`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index into the declaration arena.
///
/// # Design
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Stable for the lifetime of a round; never reused across rounds
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Create a new `DeclId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        DeclId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_raw_agree() {
        let id = DeclId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{id:?}"), "DeclId(7)");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&DeclId::new(3)).unwrap_or_default();
        assert_eq!(json, "3");
    }
}
