//! Shared tile instances.

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::id::TileId;
use crate::model::{NotifyingTile, PlainTile, TileModel};

/// Which model the harness builds for each tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileVariant {
    /// No change notification (leaks under a reflection-caching binder).
    #[default]
    Plain,
    /// Implements [`crate::NotifyOnChange`].
    Notifying,
}

impl TileVariant {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Notifying => "notifying",
        }
    }

    /// Build a fresh model of this variant.
    #[must_use]
    pub fn build_model(self) -> Box<dyn TileModel> {
        match self {
            Self::Plain => Box::new(PlainTile::new()),
            Self::Notifying => Box::new(NotifyingTile::new()),
        }
    }

    /// Build a fresh shared tile with the given identity.
    #[must_use]
    pub fn build(self, id: TileId) -> TileRef {
        Arc::new(Tile::new(id, self))
    }
}

impl fmt::Display for TileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile variant '{0}' (expected 'plain' or 'notifying')")]
pub struct UnknownVariant(pub String);

impl FromStr for TileVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "leaky" => Ok(Self::Plain),
            "notifying" | "fixed" => Ok(Self::Notifying),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// A tile instance: identity plus its model.
pub struct Tile {
    id: TileId,
    variant: TileVariant,
    model: Mutex<Box<dyn TileModel>>,
}

/// Shared handle to a tile.
pub type TileRef = Arc<Tile>;

impl Tile {
    #[must_use]
    pub fn new(id: TileId, variant: TileVariant) -> Self {
        Self {
            id,
            variant,
            model: Mutex::new(variant.build_model()),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub const fn variant(&self) -> TileVariant {
        self.variant
    }

    /// Lock the model for reading or writing.
    pub fn model(&self) -> MutexGuard<'_, Box<dyn TileModel>> {
        self.model.lock()
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("id", &self.id)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_builds_matching_model() {
        let plain = TileVariant::Plain.build(TileId::from_raw(0));
        let notifying = TileVariant::Notifying.build(TileId::from_raw(1));

        assert!(plain.model().notifier().is_none());
        assert!(notifying.model().notifier().is_some());
        assert_eq!(plain.variant(), TileVariant::Plain);
        assert_eq!(notifying.id(), TileId::from_raw(1));
    }

    #[test]
    fn test_model_is_mutable_through_handle() {
        let tile = TileVariant::Plain.build(TileId::from_raw(3));
        tile.model().set_stroke_thickness(9.0);

        assert!((tile.model().stroke_thickness() - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!("plain".parse::<TileVariant>(), Ok(TileVariant::Plain));
        assert_eq!(" Notifying ".parse::<TileVariant>(), Ok(TileVariant::Notifying));
        assert_eq!("fixed".parse::<TileVariant>(), Ok(TileVariant::Notifying));
        assert!("weak".parse::<TileVariant>().is_err());
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = "Weak".parse::<TileVariant>().unwrap_err();
        assert_eq!(err, UnknownVariant("weak".to_owned()));
        assert_eq!(
            err.to_string(),
            "unknown tile variant 'weak' (expected 'plain' or 'notifying')"
        );
    }
}
