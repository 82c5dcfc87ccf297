//! Binding churn harness core.
//!
//! # Churn cycle
//!
//! ```text
//! tick (adding)     build 300 fresh tiles -> attach each to the registry
//! tick (shrinking)  detach + drop every tile -> reclaim -> cycle += 1
//! after each tick   sample memory -> StatusSnapshot
//! ```
//!
//! After a shrink the controller holds nothing, so whatever memory stays
//! resident is being kept alive by the binding registry. With plain tiles a
//! reflection-caching binder keeps every instance; with notifying tiles it
//! lets go.
//!
//! # Usage
//!
//! ```
//! use churn_core::{BATCH_SIZE, ChurnController};
//! use churn_model::TileVariant;
//! use churn_registry::SimulatedBindingRegistry;
//! use churn_sampler::ProcessSampler;
//!
//! let mut controller = ChurnController::new(
//!     TileVariant::Notifying,
//!     ProcessSampler::new(),
//!     SimulatedBindingRegistry::new(),
//! );
//!
//! controller.start();
//! assert_eq!(controller.tick().tile_count, BATCH_SIZE);
//! assert_eq!(controller.tick().cycle_count, 1);
//! ```

use std::time::Duration;

mod controller;
mod status;

pub use controller::ChurnController;
pub use status::{Phase, StatusSnapshot};

/// Tiles created per add phase.
pub const BATCH_SIZE: usize = 300;

/// Interval between ticks.
pub const PHASE_INTERVAL: Duration = Duration::from_millis(250);
