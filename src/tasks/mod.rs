//! Background Tasks Module
//!
//! Contains background tasks that run periodically while caches are alive.
//!
//! # Tasks
//! - Cache cleanup: reaps expired entries of one cache at its configured interval
//! - Metrics report: logs registry metrics at a fixed interval

mod cleanup;
mod report;

pub use cleanup::spawn_cleanup_task;
pub use report::spawn_metrics_report_task;
