//! The churn-cycle controller.

use churn_model::{TileIdAllocator, TileRef, TileVariant};
use churn_registry::ObserverRegistry;
use churn_sampler::MemorySampler;
use tracing::{debug, info, warn};

use crate::BATCH_SIZE;
use crate::status::{Phase, StatusSnapshot};

/// Alternates between adding a batch of tiles and clearing them all.
///
/// Every tile is attached to the registry when added and detached when
/// cleared, after which the controller holds no reference to it. Anything
/// that survives a shrink is kept alive by the registry alone.
///
/// All commands take `&mut self`; the driver calls them from one thread.
pub struct ChurnController<S, R> {
    variant: TileVariant,
    sampler: S,
    registry: R,
    ids: TileIdAllocator,
    tiles: Vec<TileRef>,
    cycle_count: u64,
    adding_phase: bool,
    running: bool,
    snapshot: StatusSnapshot,
}

impl<S: MemorySampler, R: ObserverRegistry> ChurnController<S, R> {
    /// Create an idle controller whose first tick adds a batch.
    pub fn new(variant: TileVariant, sampler: S, registry: R) -> Self {
        Self {
            variant,
            sampler,
            registry,
            ids: TileIdAllocator::new(),
            tiles: Vec::with_capacity(BATCH_SIZE),
            cycle_count: 0,
            adding_phase: true,
            running: false,
            snapshot: StatusSnapshot::default(),
        }
    }

    /// Ask the driver to start ticking. The pending phase is kept.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            info!(variant = %self.variant, phase = %self.pending_phase(), "churn started");
        }
    }

    /// Ask the driver to stop ticking. Tiles and counters are kept.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(cycles = self.cycle_count, tiles = self.tiles.len(), "churn stopped");
        }
    }

    /// Run the pending phase and refresh the status.
    ///
    /// Runs regardless of [`Self::is_running`]; scheduling is the driver's job.
    pub fn tick(&mut self) -> StatusSnapshot {
        if self.adding_phase {
            self.grow();
        } else {
            self.shrink();
        }
        self.adding_phase = !self.adding_phase;
        self.refresh()
    }

    /// Reclaim now and refresh the status without touching tiles or cycles.
    pub fn force_gc_now(&mut self) -> StatusSnapshot {
        self.reclaim();
        self.refresh()
    }

    /// `Idle` when stopped, otherwise the phase the next tick will run.
    pub fn state(&self) -> Phase {
        if self.running {
            self.pending_phase()
        } else {
            Phase::Idle
        }
    }

    /// The phase the next tick will run, even while stopped.
    pub fn pending_phase(&self) -> Phase {
        if self.adding_phase {
            Phase::Adding
        } else {
            Phase::Shrinking
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Status as of the last tick or forced reclamation.
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    /// Live tiles in display order.
    pub fn tiles(&self) -> &[TileRef] {
        &self.tiles
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn variant(&self) -> TileVariant {
        self.variant
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    fn grow(&mut self) {
        self.tiles.reserve(BATCH_SIZE);
        for _ in 0..BATCH_SIZE {
            let tile = self.variant.build(self.ids.allocate());
            self.registry.attach(&tile);
            self.tiles.push(tile);
        }
        debug!(tiles = self.tiles.len(), "added batch");
    }

    fn shrink(&mut self) {
        for tile in self.tiles.drain(..) {
            self.registry.detach(&tile);
        }
        self.reclaim();
        self.cycle_count += 1;
        info!(
            cycle = self.cycle_count,
            retained = self.registry.retained_count(),
            "cycle complete"
        );
    }

    fn reclaim(&mut self) {
        if let Err(error) = self.sampler.force_reclaim() {
            warn!(%error, "reclamation request failed");
        }
    }

    fn refresh(&mut self) -> StatusSnapshot {
        let (memory_mb, stale) = match self.sampler.sample() {
            Ok(mb) => (Some(mb), false),
            Err(error) => {
                warn!(%error, "memory sample failed, keeping previous value");
                (self.snapshot.memory_mb, true)
            }
        };

        self.snapshot = StatusSnapshot {
            cycle_count: self.cycle_count,
            tile_count: self.tiles.len(),
            memory_mb,
            stale,
        };
        debug!(status = %self.snapshot, "status refreshed");
        self.snapshot
    }
}

impl<S, R> core::fmt::Debug for ChurnController<S, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChurnController")
            .field("variant", &self.variant)
            .field("tiles", &self.tiles.len())
            .field("cycle_count", &self.cycle_count)
            .field("adding_phase", &self.adding_phase)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
