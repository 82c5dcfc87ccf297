//! Tile models for the binding churn harness.
//!
//! # Capability, not type
//!
//! ```text
//! PlainTile      text, stroke_thickness
//! NotifyingTile  text, stroke_thickness + NotifyOnChange
//! ```
//!
//! Both variants have the same bindable surface. A binding layer asks each
//! model for its [`NotifyOnChange`] surface through [`TileModel::notifier`];
//! whether it gets one decides whether the binder can later let go.
//!
//! # Example
//!
//! ```
//! use churn_model::{NotifyOnChange, TileIdAllocator, TileModel, TileVariant};
//!
//! let mut ids = TileIdAllocator::new();
//! let tile = TileVariant::Notifying.build(ids.allocate());
//!
//! let mut model = tile.model();
//! let notifier = model.notifier().expect("notifying tiles can be observed");
//! notifier.subscribe(Box::new(|event| println!("{} changed", event.property_name())));
//! ```

mod id;
mod model;
mod observer;
mod tile;

pub use id::{RawTileId, TileId, TileIdAllocator};
pub use model::{
    DEFAULT_STROKE_THICKNESS, DEFAULT_TEXT, NotifyOnChange, NotifyingTile, PlainTile, TileModel,
};
pub use observer::{ChangeObservers, Property, PropertyChanged, PropertyHandler, SubscriptionId};
pub use tile::{Tile, TileRef, TileVariant, UnknownVariant};
