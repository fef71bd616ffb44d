//! Cache Entry Module
//!
//! Defines individual cache entries, their access bookkeeping and the clock
//! that timestamps them.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

// == Clock ==
/// Source of wall-clock time in Unix milliseconds.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time in Unix milliseconds.
    fn now_ms(&self) -> u64;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }
}

/// Manually driven clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(duration_to_ms(by), Ordering::SeqCst);
    }

    /// Jumps the clock to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Time-to-live in milliseconds, always > 0
    pub ttl_ms: u64,
    /// Estimated footprint in bytes
    pub size: usize,
    /// Number of successful reads
    pub access_count: u64,
    /// Last successful read, or creation (Unix milliseconds)
    pub last_accessed: u64,
    /// Recency sequence number, breaks ties between equal `last_accessed`
    pub access_seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a fresh entry stamped at `now`.
    pub fn new(data: T, size: usize, ttl_ms: u64, now: u64, seq: u64) -> Self {
        Self {
            data,
            timestamp: now,
            ttl_ms: ttl_ms.max(1),
            size,
            access_count: 0,
            last_accessed: now,
            access_seq: seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Strict boundary: an entry whose age equals its TTL is still live.
    pub fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) > self.ttl_ms
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, now: u64, seq: u64) {
        self.access_count += 1;
        self.last_accessed = now.max(self.timestamp);
        self.access_seq = seq;
    }

    /// Key used to order entries by recency, oldest first.
    pub fn recency(&self) -> (u64, u64) {
        (self.last_accessed, self.access_seq)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        let expires = self.timestamp.saturating_add(self.ttl_ms);
        expires.saturating_sub(now)
    }

    /// Snapshot of the entry metadata.
    pub fn info(&self, now: u64) -> EntryInfo {
        EntryInfo {
            size: self.size,
            ttl_ms: self.ttl_ms,
            age_ms: now.saturating_sub(self.timestamp),
            ttl_remaining_ms: self.ttl_remaining_ms(now),
            access_count: self.access_count,
            last_accessed: self.last_accessed,
        }
    }
}

// == Entry Info ==
/// Read-only metadata of an entry, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub size: usize,
    pub ttl_ms: u64,
    pub age_ms: u64,
    pub ttl_remaining_ms: u64,
    pub access_count: u64,
    pub last_accessed: u64,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(duration_to_ms)
        .unwrap_or(0)
}

/// Converts a duration to whole milliseconds, saturating.
pub fn duration_to_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
