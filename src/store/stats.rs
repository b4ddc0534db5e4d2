//! Store Statistics Module
//!
//! Tracks read-cache performance and store traffic counters.

use serde::Serialize;

// == Store Stats ==
/// Tracks store and cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of reads served directly from the cache
    pub cache_hits: u64,
    /// Number of reads that missed the cache
    pub cache_misses: u64,
    /// Number of cache misses that found the entity in the backing store
    pub store_reads: u64,
    /// Number of cache entries removed by entity deletion
    pub invalidations: u64,
    /// Current number of entities in the store
    pub total_entities: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns cache_hits / (cache_hits + cache_misses), or 0.0 if no
    /// reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the cache hit counter.
    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    // == Record Miss ==
    /// Increments the cache miss counter.
    pub fn record_miss(&mut self) {
        self.cache_misses += 1;
    }

    // == Record Store Read ==
    /// Increments the backing-store read counter.
    pub fn record_store_read(&mut self) {
        self.store_reads += 1;
    }

    // == Record Invalidation ==
    /// Increments the invalidation counter.
    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    // == Update Entity Count ==
    /// Updates the total entity count.
    pub fn set_total_entities(&mut self, count: usize) {
        self.total_entities = count;
    }
}
