//! Lost & Found Cache - in-memory caching engine for the lost-and-found app
//!
//! Bounded TTL + LRU look-aside caches for images, posts, user profiles and
//! notifications, a registry owning the named instances, key builders,
//! invalidation helpers, and a small admin API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod keys;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheKey, CacheMetrics, CacheOptions};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::{CacheName, CacheRegistry};
