//! Data models
//!
//! Domain entities held in the caches, plus the DTOs used for
//! serializing/deserializing admin API request and response bodies.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{
    CachedImage, Notification, NotificationCacheValue, NotificationKind, Post, PostCacheValue,
    PostKind, PostStatus, UserProfile,
};
pub use requests::{InvalidateRequest, InvalidationTarget};
pub use responses::{
    CacheStatsResponse, CleanupResponse, ClearResponse, DeleteKeyResponse, ErrorResponse,
    HealthResponse, InvalidateResponse, KeysResponse, StatsResponse,
};
