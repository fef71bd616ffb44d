//! Cache Engine Module
//!
//! Public cache type: a [`CacheStore`] behind a lock plus the background
//! cleanup task that reaps it.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{
    CacheKey, CacheMetrics, CacheOptions, CacheStore, CleanupReport, Clock, EntryInfo,
    EstimateSize, SystemClock,
};
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

// == Cache ==
/// Bounded TTL + LRU look-aside cache.
///
/// Every operation is synchronous and total. The only background activity is
/// the periodic [`cleanup`](Cache::cleanup), started at construction when a
/// tokio runtime is available and stopped by [`destroy`](Cache::destroy) or
/// on drop.
pub struct Cache<T> {
    name: String,
    store: Arc<Mutex<CacheStore<T>>>,
    cleanup_handle: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Cache<T>
where
    T: Clone + EstimateSize + Send + 'static,
{
    // == Constructors ==
    /// Creates a cache on the system clock.
    pub fn new(name: impl Into<String>, options: CacheOptions) -> Result<Self> {
        Self::with_clock(name, options, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit time source.
    pub fn with_clock(
        name: impl Into<String>,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        options.validate()?;

        let name = name.into();
        let interval = options.cleanup_interval;
        let store = Arc::new(Mutex::new(CacheStore::new(name.clone(), options, clock)));

        let cleanup_handle = match Handle::try_current() {
            Ok(handle) => Some(spawn_cleanup_task(
                &handle,
                Arc::downgrade(&store),
                interval,
            )),
            Err(_) => {
                warn!(
                    cache = %name,
                    "No tokio runtime available, background cleanup disabled"
                );
                None
            }
        };

        Ok(Self {
            name,
            store,
            cleanup_handle: Mutex::new(cleanup_handle),
        })
    }

    // == Core Operations ==
    /// Returns the cached value, or `None` on a miss or an expired entry.
    pub fn get(&self, key: impl Into<CacheKey>) -> Option<T> {
        self.store.lock().get(&key.into())
    }

    /// Stores a value under the default TTL.
    pub fn set(&self, key: impl Into<CacheKey>, value: T) {
        self.store.lock().set(key.into(), value, None);
    }

    /// Stores a value with a custom TTL.
    pub fn set_with_ttl(&self, key: impl Into<CacheKey>, value: T, ttl: Duration) {
        self.store.lock().set(key.into(), value, Some(ttl));
    }

    /// Removes a key. Returns whether it was present.
    pub fn delete(&self, key: impl Into<CacheKey>) -> bool {
        self.store.lock().delete(&key.into())
    }

    /// Checks for a live entry without counting a hit or miss.
    pub fn has(&self, key: impl Into<CacheKey>) -> bool {
        self.store.lock().has(&key.into())
    }

    /// Removes every entry and resets metrics.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Runs one expiration sweep and count-budget pass.
    pub fn cleanup(&self) -> CleanupReport {
        self.store.lock().cleanup()
    }

    /// Look-aside helper: returns the cached value or computes, stores and
    /// returns it.
    pub fn get_or_insert_with<F>(&self, key: impl Into<CacheKey>, fetch: F) -> T
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        if let Some(value) = self.store.lock().get(&key) {
            return value;
        }

        // Lock released while fetching
        let value = fetch();
        self.store.lock().set(key, value.clone(), None);
        value
    }

    // == Introspection ==
    /// Metrics snapshot with a freshly computed hit rate.
    pub fn get_metrics(&self) -> CacheMetrics {
        self.store.lock().metrics()
    }

    /// Currently stored keys.
    pub fn get_keys(&self) -> Vec<CacheKey> {
        self.store.lock().keys()
    }

    /// Current entry count.
    pub fn size(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Estimated bytes held.
    pub fn total_size(&self) -> usize {
        self.store.lock().total_size()
    }

    pub fn peek_entry(&self, key: impl Into<CacheKey>) -> Option<EntryInfo> {
        self.store.lock().peek_entry(&key.into())
    }

    pub fn options(&self) -> CacheOptions {
        self.store.lock().options().clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Lifecycle ==
    /// Stops background cleanup and drops every entry.
    ///
    /// Calling it again is harmless. The cache should not be used afterwards.
    pub fn destroy(&self) {
        self.stop_scheduler();
        self.store.lock().clear();
        debug!(cache = %self.name, "Cache destroyed");
    }

    /// Whether the background cleanup task is alive.
    pub fn is_scheduler_running(&self) -> bool {
        self.cleanup_handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn stop_scheduler(&self) {
        if let Some(handle) = self.cleanup_handle.lock().take() {
            handle.abort();
            debug!(cache = %self.name, "Cleanup task aborted");
        }
    }
}

impl<T> Drop for Cache<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup_handle.get_mut().take() {
            handle.abort();
        }
    }
}

impl<T> Debug for Cache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").field("name", &self.name).finish()
    }
}
