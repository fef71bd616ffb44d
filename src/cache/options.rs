//! Cache Options Module
//!
//! Construction-time budgets and timings for one cache instance.

use std::time::Duration;

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default entry TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default byte budget
pub const DEFAULT_MAX_SIZE: usize = 50 * 1024 * 1024;

/// Default entry-count budget
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default cleanup period
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

// == Cache Options ==
/// Options fixed at construction of a [`Cache`](crate::cache::Cache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheOptions {
    /// TTL applied when `set` gets no custom TTL
    pub ttl: Duration,
    /// Byte budget (soft)
    pub max_size: usize,
    /// Entry-count budget (soft)
    pub max_entries: usize,
    /// Period of the background cleanup sweep
    pub cleanup_interval: Duration,
    /// Whether counters accumulate
    pub enable_metrics: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
            max_entries: DEFAULT_MAX_ENTRIES,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            enable_metrics: true,
        }
    }
}

impl CacheOptions {
    /// Starts from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn enable_metrics(mut self, enabled: bool) -> Self {
        self.enable_metrics = enabled;
        self
    }

    // == Validate ==
    /// Rejects options that would break entry or scheduler invariants.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidOptions(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.max_entries == 0 {
            return Err(CacheError::InvalidOptions(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidOptions(
                "cleanup_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
