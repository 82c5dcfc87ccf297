//! Simulated binding registry with a never-evicted descriptor cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use churn_model::{SubscriptionId, TileId, TileRef};
use hashbrown::HashMap;
use tracing::trace;

use crate::ObserverRegistry;

/// An active binding between the registry and a displayed tile.
struct Binding {
    tile: TileRef,
    /// Present when the tile could be subscribed to.
    subscription: Option<SubscriptionId>,
}

/// In-memory binder honoring the [`ObserverRegistry`] contract.
///
/// Tiles without change notification get an extra descriptor-cache entry on
/// attach. The cache is keyed by instance and nothing ever evicts it.
#[derive(Default)]
pub struct SimulatedBindingRegistry {
    bindings: HashMap<TileId, Binding>,
    descriptor_cache: HashMap<TileId, TileRef>,
    /// Change notifications delivered to any binding.
    updates: Arc<AtomicU64>,
}

impl SimulatedBindingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles currently attached.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Entries in the descriptor cache.
    #[must_use]
    pub fn cached_descriptor_count(&self) -> usize {
        self.descriptor_cache.len()
    }

    /// Total change notifications received from bound tiles.
    #[must_use]
    pub fn updates_received(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Whether the registry still references the tile with `id`.
    #[must_use]
    pub fn is_retaining(&self, id: TileId) -> bool {
        self.bindings.contains_key(&id) || self.descriptor_cache.contains_key(&id)
    }

    fn subscribe(&self, tile: &TileRef) -> Option<SubscriptionId> {
        let mut model = tile.model();
        let notifier = model.notifier()?;
        let updates = Arc::clone(&self.updates);
        Some(notifier.subscribe(Box::new(move |_event| {
            updates.fetch_add(1, Ordering::Relaxed);
        })))
    }
}

impl ObserverRegistry for SimulatedBindingRegistry {
    fn attach(&mut self, tile: &TileRef) {
        let id = tile.id();
        if self.bindings.contains_key(&id) {
            return;
        }

        let subscription = self.subscribe(tile);
        if subscription.is_none() {
            self.descriptor_cache
                .entry(id)
                .or_insert_with(|| Arc::clone(tile));
            trace!(tile = %id, "no change notification, cached descriptor");
        }

        self.bindings.insert(
            id,
            Binding {
                tile: Arc::clone(tile),
                subscription,
            },
        );
    }

    fn detach(&mut self, tile: &TileRef) {
        let Some(binding) = self.bindings.remove(&tile.id()) else {
            return;
        };

        if let Some(subscription) = binding.subscription {
            let mut model = binding.tile.model();
            if let Some(notifier) = model.notifier() {
                notifier.unsubscribe(subscription);
            }
        }
    }

    fn retained_count(&self) -> usize {
        let cached_only = self
            .descriptor_cache
            .keys()
            .filter(|id| !self.bindings.contains_key(*id))
            .count();
        self.bindings.len() + cached_only
    }
}

impl core::fmt::Debug for SimulatedBindingRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimulatedBindingRegistry")
            .field("bindings", &self.bindings.len())
            .field("descriptor_cache", &self.descriptor_cache.len())
            .field("updates", &self.updates_received())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use churn_model::{TileIdAllocator, TileVariant};

    #[test]
    fn test_notifying_tile_is_released_on_detach() {
        let mut ids = TileIdAllocator::new();
        let mut registry = SimulatedBindingRegistry::new();
        let tile = TileVariant::Notifying.build(ids.allocate());

        registry.attach(&tile);
        assert_eq!(registry.retained_count(), 1);
        assert_eq!(tile.model().notifier().map(|n| n.subscriber_count()), Some(1));

        registry.detach(&tile);
        assert_eq!(registry.retained_count(), 0);
        assert_eq!(tile.model().notifier().map(|n| n.subscriber_count()), Some(0));
        assert_eq!(Arc::strong_count(&tile), 1);
    }

    #[test]
    fn test_plain_tile_stays_cached_after_detach() {
        let mut ids = TileIdAllocator::new();
        let mut registry = SimulatedBindingRegistry::new();
        let tile = TileVariant::Plain.build(ids.allocate());

        registry.attach(&tile);
        registry.detach(&tile);

        assert_eq!(registry.bound_count(), 0);
        assert_eq!(registry.cached_descriptor_count(), 1);
        assert_eq!(registry.retained_count(), 1);
        assert!(registry.is_retaining(tile.id()));
        assert_eq!(Arc::strong_count(&tile), 2);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut ids = TileIdAllocator::new();
        let mut registry = SimulatedBindingRegistry::new();
        let plain = TileVariant::Plain.build(ids.allocate());
        let notifying = TileVariant::Notifying.build(ids.allocate());

        for _ in 0..3 {
            registry.attach(&plain);
            registry.attach(&notifying);
        }

        assert_eq!(registry.retained_count(), 2);
        assert_eq!(
            notifying.model().notifier().map(|n| n.subscriber_count()),
            Some(1)
        );
    }

    #[test]
    fn test_bound_tile_updates_reach_registry() {
        let mut ids = TileIdAllocator::new();
        let mut registry = SimulatedBindingRegistry::new();
        let tile = TileVariant::Notifying.build(ids.allocate());

        registry.attach(&tile);
        tile.model().set_text("Tile");
        tile.model().set_text("Changed");
        tile.model().set_stroke_thickness(3.0);

        assert_eq!(registry.updates_received(), 2);

        registry.detach(&tile);
        tile.model().set_text("After");
        assert_eq!(registry.updates_received(), 2);
    }

    #[test]
    fn test_detach_unknown_tile_is_noop() {
        let mut ids = TileIdAllocator::new();
        let mut registry = SimulatedBindingRegistry::new();
        let tile = TileVariant::Notifying.build(ids.allocate());

        registry.detach(&tile);
        assert_eq!(registry.retained_count(), 0);
    }
}
