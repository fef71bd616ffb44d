//! TTL Cleanup Task
//!
//! Background task that periodically reaps one cache store.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, EstimateSize};

/// Spawns a background task that periodically runs [`CacheStore::cleanup`].
///
/// The task only holds a weak reference: it stops by itself once the store
/// is dropped, and is otherwise stopped by aborting the returned handle.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new("posts", options, clock)));
/// let handle = spawn_cleanup_task(&Handle::current(), Arc::downgrade(&store), interval);
/// // Later, on shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<T>(
    runtime: &Handle,
    store: Weak<Mutex<CacheStore<T>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    T: Clone + EstimateSize + Send + 'static,
{
    runtime.spawn(async move {
        debug!(
            "Starting cache cleanup task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!("Cache store dropped, stopping cleanup task");
                break;
            };

            let (name, report) = {
                let mut guard = store.lock();
                (guard.name().to_string(), guard.cleanup())
            };

            if report.removed() > 0 {
                info!(
                    cache = %name,
                    expired = report.expired,
                    evicted = report.evicted,
                    "Cache cleanup removed entries"
                );
            } else {
                debug!(cache = %name, "Cache cleanup: nothing to remove");
            }
        }
    })
}
