//! LRU Eviction Policy Module
//!
//! Picks eviction victims for the two cache budgets. Ordering is decided
//! solely by entry recency (`last_accessed`, then access sequence), never by
//! map iteration order.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheKey};

// == Constants ==
/// Share of `max_entries` evicted by one count-budget pass, in percent
pub const COUNT_EVICTION_PERCENT: usize = 10;

// == LRU Policy ==
/// Stateless victim selection over an entry map.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl LruPolicy {
    // == Recency Order ==
    /// Returns every key with its size, least recently used first.
    pub fn by_recency<T>(entries: &HashMap<CacheKey, CacheEntry<T>>) -> Vec<(CacheKey, usize)> {
        let mut ordered: Vec<(&CacheKey, &CacheEntry<T>)> = entries.iter().collect();
        ordered.sort_by(|(ka, a), (kb, b)| {
            a.recency()
                .cmp(&b.recency())
                .then_with(|| ka.cmp(kb))
        });
        ordered
            .into_iter()
            .map(|(key, entry)| (key.clone(), entry.size))
            .collect()
    }

    // == Count Budget ==
    /// Number of entries one count-budget pass removes: ceil(10% of max).
    pub fn count_batch(max_entries: usize) -> usize {
        max_entries
            .saturating_mul(COUNT_EVICTION_PERCENT)
            .div_ceil(100)
            .max(1)
    }

    /// Selects the oldest `count_batch(max_entries)` keys.
    pub fn count_victims<T>(
        entries: &HashMap<CacheKey, CacheEntry<T>>,
        max_entries: usize,
    ) -> Vec<CacheKey> {
        Self::by_recency(entries)
            .into_iter()
            .take(Self::count_batch(max_entries))
            .map(|(key, _)| key)
            .collect()
    }

    // == Size Budget ==
    /// Selects the oldest keys whose combined size frees room for `new_size`.
    ///
    /// Returns nothing when `total_size + new_size` already fits. If even
    /// evicting everything is not enough, every key is returned.
    pub fn space_victims<T>(
        entries: &HashMap<CacheKey, CacheEntry<T>>,
        total_size: usize,
        new_size: usize,
        max_size: usize,
    ) -> Vec<CacheKey> {
        let projected = total_size.saturating_add(new_size);
        if projected <= max_size {
            return Vec::new();
        }

        let required = projected - max_size;
        let mut freed = 0usize;
        let mut victims = Vec::new();

        for (key, size) in Self::by_recency(entries) {
            if freed >= required {
                break;
            }
            freed = freed.saturating_add(size);
            victims.push(key);
        }

        victims
    }
}
