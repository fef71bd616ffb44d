//! Cache Store Module
//!
//! Synchronous cache core: entry map, TTL expiration, LRU budgets and
//! metrics. Timers live in [`Cache`](crate::cache::Cache), not here.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::cache::entry::duration_to_ms;
use crate::cache::{
    estimate, CacheEntry, CacheKey, CacheMetrics, CacheOptions, Clock, EntryInfo, EstimateSize,
    LruPolicy, MetricsTracker,
};

// == Cleanup Report ==
/// Outcome of one [`CacheStore::cleanup`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Entries removed because their TTL elapsed
    pub expired: usize,
    /// Entries removed to get back under the count budget
    pub evicted: usize,
}

impl CleanupReport {
    /// Total entries removed.
    pub fn removed(&self) -> usize {
        self.expired + self.evicted
    }
}

// == Cache Store ==
/// Entry store with TTL expiration and LRU eviction.
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Name used in log lines
    name: String,
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry<T>>,
    /// Counters and gauges
    metrics: MetricsTracker,
    /// Budgets and default TTL
    options: CacheOptions,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Monotonic recency counter
    seq: u64,
}

impl<T> CacheStore<T>
where
    T: Clone + EstimateSize,
{
    // == Constructor ==
    /// Creates an empty store. Options are assumed to be validated.
    pub fn new(name: impl Into<String>, options: CacheOptions, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
            metrics: MetricsTracker::new(options.enable_metrics),
            options,
            clock,
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &CacheKey) -> Option<T> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            None => {
                self.metrics.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.remove_expired(key);
            self.metrics.record_miss();
            return None;
        }

        let seq = self.next_seq();
        let entry = self.entries.get_mut(key)?;
        entry.touch(now, seq);
        let value = entry.data.clone();
        self.metrics.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a value, overwriting silently.
    ///
    /// A missing or zero `ttl` falls back to the default TTL. Budgets are
    /// soft: eviction runs first, then the insert always happens.
    pub fn set(&mut self, key: CacheKey, value: T, ttl: Option<Duration>) {
        let size = estimate(&value);
        let ttl = ttl.filter(|t| !t.is_zero()).unwrap_or(self.options.ttl);

        self.ensure_space(size);

        // Count budget applies to overwrites too; the key itself may be a victim
        if self.entries.len() >= self.options.max_entries {
            self.evict_lru();
        }

        if let Some(previous) = self.entries.remove(&key) {
            self.metrics.retire_size(previous.size);
        }

        let now = self.clock.now_ms();
        let seq = self.next_seq();
        debug!(cache = %self.name, key = %key, size, "cache set");
        let entry = CacheEntry::new(value, size, duration_to_ms(ttl), now, seq);
        self.entries.insert(key, entry);
        self.metrics.record_set(size);
        self.metrics.set_entry_count(self.entries.len());
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &CacheKey) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                debug!(cache = %self.name, key = %key, "cache delete");
                self.metrics.record_delete(entry.size);
                self.metrics.set_entry_count(self.entries.len());
                true
            }
            None => false,
        }
    }

    // == Has ==
    /// Checks for a live entry without touching access stats.
    ///
    /// An expired entry is removed on the way.
    pub fn has(&mut self, key: &CacheKey) -> bool {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            None => return false,
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.remove_expired(key);
        }
        !expired
    }

    // == Clear ==
    /// Removes every entry and zeroes all metrics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.metrics.reset();
        debug!(cache = %self.name, "cache cleared");
    }

    // == Cleanup ==
    /// Active expiration sweep followed by count-budget enforcement.
    pub fn cleanup(&mut self) -> CleanupReport {
        let now = self.clock.now_ms();
        let expired_keys: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let mut report = CleanupReport::default();
        for key in expired_keys {
            if self.evict(&key) {
                report.expired += 1;
            }
        }

        if self.entries.len() > self.options.max_entries {
            report.evicted = self.evict_lru();
        }

        self.metrics.set_entry_count(self.entries.len());
        report
    }

    // == Accessors ==
    /// Returns current metrics with a fresh hit rate.
    pub fn metrics(&self) -> CacheMetrics {
        let mut metrics = self.metrics.snapshot();
        metrics.entry_count = self.entries.len();
        metrics
    }

    /// Returns every stored key, expired or not, in no particular order.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Estimated bytes currently held.
    pub fn total_size(&self) -> usize {
        self.metrics.total_size()
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry metadata without access bookkeeping or expiration.
    pub fn peek_entry(&self, key: &CacheKey) -> Option<EntryInfo> {
        let now = self.clock.now_ms();
        self.entries.get(key).map(|entry| entry.info(now))
    }

    // == Eviction ==
    /// Size-budget eviction ahead of an insert of `new_size` bytes.
    fn ensure_space(&mut self, new_size: usize) -> usize {
        let victims = LruPolicy::space_victims(
            &self.entries,
            self.metrics.total_size(),
            new_size,
            self.options.max_size,
        );
        self.evict_all(victims)
    }

    /// Count-budget eviction of the oldest ~10% of `max_entries`.
    fn evict_lru(&mut self) -> usize {
        let victims = LruPolicy::count_victims(&self.entries, self.options.max_entries);
        self.evict_all(victims)
    }

    fn evict_all(&mut self, victims: Vec<CacheKey>) -> usize {
        let mut evicted = 0;
        for key in victims {
            if self.evict(&key) {
                evicted += 1;
            }
        }
        evicted
    }

    fn evict(&mut self, key: &CacheKey) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                debug!(cache = %self.name, key = %key, size = entry.size, "cache eviction");
                self.metrics.record_eviction(entry.size);
                self.metrics.set_entry_count(self.entries.len());
                true
            }
            None => false,
        }
    }

    fn remove_expired(&mut self, key: &CacheKey) {
        if let Some(entry) = self.entries.remove(key) {
            debug!(cache = %self.name, key = %key, "cache entry expired on access");
            self.metrics.record_delete(entry.size);
            self.metrics.set_entry_count(self.entries.len());
        }
    }
}
