//! Cache Metrics Module
//!
//! Tracks cache performance counters and live size gauges.

use serde::Serialize;

// == Cache Metrics ==
/// Snapshot of cache counters and gauges.
///
/// `hit_rate` is only meaningful on snapshots returned by
/// [`MetricsTracker::snapshot`]; it is recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheMetrics {
    /// Successful reads
    pub hits: u64,
    /// Reads of absent or expired keys
    pub misses: u64,
    /// Inserts and overwrites
    pub sets: u64,
    /// Caller-driven removals, including lazy expiration
    pub deletes: u64,
    /// Policy-driven removals (budgets and active expiration)
    pub evictions: u64,
    /// Estimated bytes currently held
    pub total_size: usize,
    /// Entries currently held
    pub entry_count: usize,
    /// hits / (hits + misses), 0 when there were no reads
    pub hit_rate: f64,
}

impl CacheMetrics {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn compute_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Metrics Tracker ==
/// Mutable counters owned by one cache instance.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    metrics: CacheMetrics,
    enabled: bool,
}

impl MetricsTracker {
    // == Constructor ==
    /// Creates a tracker with all counters at zero.
    ///
    /// When `enabled` is false the counters stay at zero; gauges still move.
    pub fn new(enabled: bool) -> Self {
        Self {
            metrics: CacheMetrics::default(),
            enabled,
        }
    }

    /// Whether counters accumulate.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        if self.enabled {
            self.metrics.hits += 1;
        }
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        if self.enabled {
            self.metrics.misses += 1;
        }
    }

    // == Record Set ==
    /// Counts an insert of `size` bytes.
    pub fn record_set(&mut self, size: usize) {
        if self.enabled {
            self.metrics.sets += 1;
        }
        self.add_size(size);
    }

    // == Record Delete ==
    /// Counts a caller-driven removal of `size` bytes.
    pub fn record_delete(&mut self, size: usize) {
        if self.enabled {
            self.metrics.deletes += 1;
        }
        self.sub_size(size);
    }

    // == Record Eviction ==
    /// Counts a policy-driven removal of `size` bytes.
    pub fn record_eviction(&mut self, size: usize) {
        if self.enabled {
            self.metrics.evictions += 1;
        }
        self.sub_size(size);
    }

    /// Retires the size of an overwritten entry without counting anything.
    pub fn retire_size(&mut self, size: usize) {
        self.sub_size(size);
    }

    // == Gauges ==
    /// Mirrors the entry store's current count.
    pub fn set_entry_count(&mut self, count: usize) {
        self.metrics.entry_count = count;
    }

    /// Current estimated bytes.
    pub fn total_size(&self) -> usize {
        self.metrics.total_size
    }

    fn add_size(&mut self, size: usize) {
        self.metrics.total_size = self.metrics.total_size.saturating_add(size);
    }

    fn sub_size(&mut self, size: usize) {
        self.metrics.total_size = self.metrics.total_size.saturating_sub(size);
    }

    // == Reset ==
    /// Zeroes every counter and gauge.
    pub fn reset(&mut self) {
        self.metrics = CacheMetrics::default();
    }

    // == Snapshot ==
    /// Returns a copy with a freshly computed hit rate.
    pub fn snapshot(&self) -> CacheMetrics {
        let mut metrics = self.metrics.clone();
        metrics.hit_rate = metrics.compute_hit_rate();
        metrics
    }
}
