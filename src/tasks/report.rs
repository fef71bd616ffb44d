//! Metrics Report Task
//!
//! Background task that periodically logs the metrics of every cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::registry::CacheRegistry;

/// Spawns a task logging registry metrics every `interval_secs` seconds.
///
/// Stops by itself once the registry is destroyed; otherwise abort the
/// returned handle.
pub fn spawn_metrics_report_task(
    registry: Arc<CacheRegistry>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting metrics report task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if registry.is_destroyed() {
                break;
            }

            for (name, metrics) in registry.metrics() {
                info!(
                    cache = %name,
                    entries = metrics.entry_count,
                    total_size = metrics.total_size,
                    hits = metrics.hits,
                    misses = metrics.misses,
                    evictions = metrics.evictions,
                    hit_rate = metrics.hit_rate,
                    "Cache metrics"
                );
            }
        }
    })
}
