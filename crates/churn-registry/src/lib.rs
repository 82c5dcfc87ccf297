//! Binding-layer contract.
//!
//! A UI binding layer is handed every tile that is put on screen. What it
//! holds on to afterwards is outside the harness's control; the harness only
//! relies on the contract spelled out on [`ObserverRegistry`].
//!
//! [`SimulatedBindingRegistry`] stands in for a real binder. It behaves like
//! a binding engine that falls back to a per-instance descriptor cache
//! whenever the bound object cannot raise change notifications:
//!
//! ```text
//! attach(notifying) -> subscribe, hold ref      detach -> unsubscribe, drop ref
//! attach(plain)     -> hold ref + cache entry   detach -> drop ref, cache entry stays
//! ```

mod simulated;

pub use simulated::SimulatedBindingRegistry;

use churn_model::TileRef;

/// The retention contract of an external binding layer.
///
/// - [`attach`](Self::attach) may retain a reference keyed by the tile's id.
///   Attaching an already attached tile is a no-op.
/// - For a tile whose model implements [`churn_model::NotifyOnChange`],
///   [`detach`](Self::detach) must release every reference the registry took.
/// - For any other tile no release is guaranteed.
pub trait ObserverRegistry {
    /// A tile was displayed and bound.
    fn attach(&mut self, tile: &TileRef);

    /// A tile was removed from display.
    fn detach(&mut self, tile: &TileRef);

    /// Number of distinct tiles the registry still references.
    fn retained_count(&self) -> usize;
}
