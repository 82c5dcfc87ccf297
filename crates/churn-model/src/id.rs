//! Tile identifiers.
//!
//! Unlike ECS entities, tile ids are never recycled: a binding layer may key
//! its caches by instance, so every tile built by the harness must look new.

use std::fmt;

/// Raw tile index.
pub type RawTileId = u64;

/// A unique, never-reused identifier for a tile instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(RawTileId);

impl TileId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn from_raw(raw: RawTileId) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> RawTileId {
        self.0
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for tile ids.
#[derive(Debug, Default)]
pub struct TileIdAllocator {
    next: RawTileId,
}

impl TileIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate a fresh id.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn allocated(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut allocator = TileIdAllocator::new();

        let a = allocator.allocate();
        let b = allocator.allocate();

        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(allocator.allocated(), 2);
    }

    #[test]
    fn test_ids_never_repeat() {
        let mut allocator = TileIdAllocator::new();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..1000 {
            assert!(seen.insert(allocator.allocate()));
        }
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", TileId::from_raw(7)), "Tile(7)");
        assert_eq!(TileId::from_raw(7).to_string(), "7");
    }
}
