//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Metrics of every cache
//! - `GET /stats/:cache` - Metrics of one cache
//! - `GET /caches/:cache/keys` - Keys held by one cache
//! - `POST /caches/:cache/cleanup` - Run an expiration sweep now
//! - `DELETE /caches/:cache` - Clear one cache
//! - `DELETE /caches/:cache/keys/:key` - Delete one key
//! - `POST /invalidate` - Run an entity invalidation helper

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
