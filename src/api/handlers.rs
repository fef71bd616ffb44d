//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::cache::CacheKey;
use crate::error::{CacheError, Result};
use crate::invalidation;
use crate::models::{
    CacheStatsResponse, CleanupResponse, ClearResponse, DeleteKeyResponse, HealthResponse,
    InvalidateRequest, InvalidateResponse, InvalidationTarget, KeysResponse, StatsResponse,
};
use crate::registry::{CacheName, CacheRegistry};

/// Application state shared across all handlers.
///
/// The registry synchronizes each cache internally, so no outer lock is
/// needed.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    /// Creates a new AppState around an initialized registry.
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    if state.registry.is_destroyed() {
        Json(HealthResponse::shutting_down())
    } else {
        Json(HealthResponse::healthy())
    }
}

/// Handler for GET /stats
///
/// Returns metrics for every registered cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.registry.metrics()))
}

/// Handler for GET /stats/:cache
pub async fn cache_stats_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<CacheStatsResponse>> {
    let name: CacheName = cache.parse()?;
    let metrics = state.registry.get(name).metrics();

    Ok(Json(CacheStatsResponse::new(name, metrics)))
}

/// Handler for GET /caches/:cache/keys
pub async fn keys_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<KeysResponse>> {
    let name: CacheName = cache.parse()?;
    let keys = state.registry.get(name).keys();

    Ok(Json(KeysResponse::new(name, keys)))
}

/// Handler for POST /caches/:cache/cleanup
///
/// Runs an expiration sweep now instead of waiting for the scheduler.
pub async fn cleanup_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<CleanupResponse>> {
    let name: CacheName = cache.parse()?;
    let report = state.registry.get(name).cleanup();

    Ok(Json(CleanupResponse::new(name, report)))
}

/// Handler for DELETE /caches/:cache
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<ClearResponse>> {
    let name: CacheName = cache.parse()?;
    state.registry.get(name).clear();

    Ok(Json(ClearResponse::new(name)))
}

/// Handler for DELETE /caches/:cache/keys/:key
///
/// Only string keys are addressable from a URL path.
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path((cache, key)): Path<(String, String)>,
) -> Result<Json<DeleteKeyResponse>> {
    let name: CacheName = cache.parse()?;
    let deleted = state
        .registry
        .get(name)
        .delete_key(CacheKey::from(key.as_str()));

    Ok(Json(DeleteKeyResponse::new(name, key, deleted)))
}

/// Handler for POST /invalidate
///
/// Runs the invalidation helper matching the requested entity. Body
/// rejections are reported as JSON errors like any other bad request.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InvalidateRequest>, JsonRejection>,
) -> Result<Json<InvalidateResponse>> {
    let Json(req) = payload?;

    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let registry = &state.registry;
    let removed = match req.target {
        InvalidationTarget::Post => invalidation::invalidate_post(registry.posts(), &req.id),
        InvalidationTarget::UserPosts => {
            invalidation::invalidate_user_posts(registry.posts(), &req.id)
        }
        InvalidationTarget::User => {
            invalidation::invalidate_user(registry.users(), registry.posts(), &req.id)
        }
        InvalidationTarget::Notifications => {
            invalidation::invalidate_notifications(registry.notifications(), &req.id)
        }
        InvalidationTarget::Image => invalidation::invalidate_image(registry.images(), &req.id),
    };

    Ok(Json(InvalidateResponse { removed }))
}
