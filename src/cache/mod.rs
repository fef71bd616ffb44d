//! Cache Module
//!
//! Provides in-memory look-aside caching with TTL expiration, size and count
//! budgets enforced by LRU eviction, and per-instance metrics.

mod engine;
mod entry;
mod key;
mod lru;
mod options;
mod size;
mod stats;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::{current_timestamp_ms, CacheEntry, Clock, EntryInfo, ManualClock, SystemClock};
pub use key::CacheKey;
pub use lru::{LruPolicy, COUNT_EVICTION_PERCENT};
pub use options::{
    CacheOptions, DEFAULT_CLEANUP_INTERVAL, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_SIZE, DEFAULT_TTL,
};
pub use size::{estimate, string_size, EstimateSize, Opaque, DEFAULT_ESTIMATE};
pub use stats::{CacheMetrics, MetricsTracker};
pub use store::{CacheStore, CleanupReport};

// == Public Constants ==
/// One kilobyte
pub const KB: usize = 1024;

/// One megabyte
pub const MB: usize = 1024 * KB;
