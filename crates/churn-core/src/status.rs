//! Controller phases and the status line shown to the user.

use core::fmt;

use serde::Serialize;

/// Controller state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not scheduled for ticks.
    Idle,
    /// Next tick adds a batch.
    Adding,
    /// Next tick clears all tiles and reclaims.
    Shrinking,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Adding => "adding",
            Self::Shrinking => "shrinking",
        })
    }
}

/// Counters refreshed after every tick and forced reclamation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatusSnapshot {
    pub cycle_count: u64,
    pub tile_count: usize,
    /// Last successful memory sample, if any.
    pub memory_mb: Option<f64>,
    /// The latest sample failed and `memory_mb` is from an earlier one.
    pub stale: bool,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle: {}, Tiles: {}, ", self.cycle_count, self.tile_count)?;
        match self.memory_mb {
            Some(mb) => write!(f, "Memory: {mb:.1} MB")?,
            None => f.write_str("Memory: n/a")?,
        }
        if self.stale {
            f.write_str(" (stale)")?;
        }
        Ok(())
    }
}
