//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies. Cached values are
//! never part of a response; only keys and metrics are.

use serde::Serialize;

use crate::cache::{CacheKey, CacheMetrics, CleanupReport};
use crate::registry::CacheName;

/// Metrics of one cache (GET /stats/:cache)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Cache name
    pub cache: CacheName,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of inserts and overwrites
    pub sets: u64,
    /// Number of caller-driven removals
    pub deletes: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Estimated bytes held
    pub total_size: usize,
    /// Current number of entries in cache
    pub entry_count: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    /// Creates a new CacheStatsResponse from a metrics snapshot
    pub fn new(cache: CacheName, metrics: CacheMetrics) -> Self {
        Self {
            cache,
            hits: metrics.hits,
            misses: metrics.misses,
            sets: metrics.sets,
            deletes: metrics.deletes,
            evictions: metrics.evictions,
            total_size: metrics.total_size,
            entry_count: metrics.entry_count,
            hit_rate: metrics.compute_hit_rate(),
        }
    }
}

/// Metrics of every cache (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub caches: Vec<CacheStatsResponse>,
}

impl StatsResponse {
    pub fn new(metrics: Vec<(CacheName, CacheMetrics)>) -> Self {
        Self {
            caches: metrics
                .into_iter()
                .map(|(name, m)| CacheStatsResponse::new(name, m))
                .collect(),
        }
    }
}

/// Keys currently held by one cache (GET /caches/:cache/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub cache: CacheName,
    pub count: usize,
    pub keys: Vec<CacheKey>,
}

impl KeysResponse {
    /// Creates a new KeysResponse, keys sorted for stable output
    pub fn new(cache: CacheName, mut keys: Vec<CacheKey>) -> Self {
        keys.sort();
        Self {
            cache,
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for POST /caches/:cache/cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub cache: CacheName,
    pub expired: usize,
    pub evicted: usize,
}

impl CleanupResponse {
    pub fn new(cache: CacheName, report: CleanupReport) -> Self {
        Self {
            cache,
            expired: report.expired,
            evicted: report.evicted,
        }
    }
}

/// Response body for DELETE /caches/:cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    pub cache: CacheName,
}

impl ClearResponse {
    pub fn new(cache: CacheName) -> Self {
        Self {
            message: format!("Cache '{}' cleared successfully", cache),
            cache,
        }
    }
}

/// Response body for DELETE /caches/:cache/keys/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteKeyResponse {
    pub cache: CacheName,
    pub key: String,
    /// Whether the key was present
    pub deleted: bool,
}

impl DeleteKeyResponse {
    pub fn new(cache: CacheName, key: impl Into<String>, deleted: bool) -> Self {
        Self {
            cache,
            key: key.into(),
            deleted,
        }
    }
}

/// Response body for POST /invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Number of keys actually removed
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Reported once the registry has been torn down
    pub fn shutting_down() -> Self {
        Self {
            status: "shutting_down".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_response_hit_rate() {
        let metrics = CacheMetrics {
            hits: 80,
            misses: 20,
            ..CacheMetrics::default()
        };
        let resp = CacheStatsResponse::new(CacheName::Post, metrics);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""cache":"post""#));
    }

    #[test]
    fn test_cache_stats_response_zero_requests() {
        let resp = CacheStatsResponse::new(CacheName::User, CacheMetrics::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_keys_response_sorted() {
        let resp = KeysResponse::new(
            CacheName::Post,
            vec![CacheKey::from("posts_all"), CacheKey::from("post_p1")],
        );
        assert_eq!(resp.count, 2);
        assert_eq!(resp.keys[0], CacheKey::from("post_p1"));
    }

    #[test]
    fn test_clear_response_serialize() {
        let resp = ClearResponse::new(CacheName::Image);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("image"));
        assert!(json.contains("cleared"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
