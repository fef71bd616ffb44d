//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle against a live registry, plus the
//! key builder and invalidation flow as the app drives it.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use lostfound_cache::api::create_router;
use lostfound_cache::models::{
    CachedImage, NotificationCacheValue, Post, PostCacheValue, PostKind, PostStatus, UserProfile,
};
use lostfound_cache::{invalidation, keys, AppState, CacheName, CacheRegistry};

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<CacheRegistry>) {
    let registry = Arc::new(CacheRegistry::init().unwrap());
    let app = create_router(AppState::new(registry.clone()));
    (app, registry)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn post(id: &str, kind: PostKind) -> Post {
    Post {
        id: id.to_string(),
        kind,
        title: format!("Post {}", id),
        description: "Black leather wallet".to_string(),
        category: "wallets".to_string(),
        location: "Library".to_string(),
        image_urls: vec![],
        owner_id: "u1".to_string(),
        status: PostStatus::Open,
        created_at: Utc::now(),
    }
}

fn user(uid: &str) -> UserProfile {
    UserProfile {
        uid: uid.to_string(),
        display_name: "Sam".to_string(),
        email: format!("{}@example.com", uid),
        photo_url: None,
        phone: None,
        is_admin: false,
        created_at: Utc::now(),
    }
}

fn image(url: &str, len: usize) -> CachedImage {
    CachedImage {
        url: url.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0; len],
        width: None,
        height: None,
    }
}

fn seed_posts(registry: &CacheRegistry) {
    let posts = registry.posts();
    posts.set(keys::post("p1"), PostCacheValue::Post(post("p1", PostKind::Lost)));
    for kind in keys::LIST_KINDS {
        posts.set(keys::posts(kind, None), PostCacheValue::List(vec![post("p1", PostKind::Lost)]));
    }
    posts.set(keys::posts("lost", Some("wallets")), PostCacheValue::List(vec![]));
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_health_after_destroy() {
    let (app, registry) = create_test_app();
    registry.destroy();

    let (status, json) = send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "shutting_down");
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_lists_every_cache() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["caches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["cache"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["image", "post", "user", "notification"]);
}

#[tokio::test]
async fn test_cache_stats_reflect_traffic() {
    let (app, registry) = create_test_app();
    let users = registry.users();
    users.set(keys::user("u1"), user("u1"));
    users.get(keys::user("u1"));
    users.get(keys::user("u2"));

    let (status, json) = send(app, "GET", "/stats/user", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cache"], "user");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["sets"], 1);
    assert_eq!(json["entry_count"], 1);
    assert_eq!(json["hit_rate"], 0.5);
    assert!(json["total_size"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_unknown_cache_returns_404() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(app, "GET", "/stats/videos", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("videos"));
}

// == Keys Endpoint Tests ==

#[tokio::test]
async fn test_keys_endpoint_sorted() {
    let (app, registry) = create_test_app();
    registry.users().set(keys::user("u2"), user("u2"));
    registry.users().set(keys::user("u1"), user("u1"));

    let (status, json) = send(app, "GET", "/caches/user/keys", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["keys"], serde_json::json!(["user_u1", "user_u2"]));
}

// == Delete / Clear Endpoint Tests ==

#[tokio::test]
async fn test_delete_key_endpoint() {
    let (app, registry) = create_test_app();
    registry.users().set(keys::user("u1"), user("u1"));

    let (status, json) = send(app.clone(), "DELETE", "/caches/user/keys/user_u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], true);
    assert!(!registry.users().has(keys::user("u1")));

    let (status, json) = send(app, "DELETE", "/caches/user/keys/user_u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], false);
}

#[tokio::test]
async fn test_clear_endpoint_resets_cache() {
    let (app, registry) = create_test_app();
    registry.users().set(keys::user("u1"), user("u1"));
    registry.posts().set(keys::post("p1"), PostCacheValue::Post(post("p1", PostKind::Found)));

    let (status, json) = send(app, "DELETE", "/caches/user", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cache"], "user");
    assert!(registry.users().is_empty());
    assert_eq!(registry.users().get_metrics().sets, 0);
    // Other caches are untouched
    assert_eq!(registry.posts().size(), 1);
}

// == Cleanup Endpoint Tests ==

#[tokio::test]
async fn test_cleanup_endpoint_reports_counts() {
    let (app, registry) = create_test_app();
    registry.notifications().set(
        keys::unread_notifications("u1"),
        NotificationCacheValue::UnreadCount(3),
    );

    let (status, json) = send(app, "POST", "/caches/notification/cleanup", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["expired"], 0);
    assert_eq!(json["evicted"], 0);
    assert_eq!(registry.notifications().size(), 1);
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_post_endpoint() {
    let (app, registry) = create_test_app();
    seed_posts(&registry);

    let (status, json) = send(
        app,
        "POST",
        "/invalidate",
        Some(r#"{"target":"post","id":"p1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 4);
    // Category listings are outside the fixed invalidation list
    assert_eq!(
        registry.posts().get_keys(),
        vec![keys::posts("lost", Some("wallets"))]
    );
}

#[tokio::test]
async fn test_invalidate_rejects_empty_id() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(
        app,
        "POST",
        "/invalidate",
        Some(r#"{"target":"user","id":"  "}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalidate_rejects_unknown_target() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(
        app,
        "POST",
        "/invalidate",
        Some(r#"{"target":"comments","id":"c1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_invalidate_rejects_malformed_body() {
    let (app, _registry) = create_test_app();

    let (status, json) = send(app, "POST", "/invalidate", Some("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == Registry Flow Tests ==

#[tokio::test]
async fn test_user_invalidation_spans_caches() {
    let (_app, registry) = create_test_app();
    registry.users().set(keys::user("u1"), user("u1"));
    registry
        .posts()
        .set(keys::user_posts("u1"), PostCacheValue::List(vec![]));
    registry.posts().set(keys::posts("all", None), PostCacheValue::List(vec![]));

    let removed = invalidation::invalidate_user(registry.users(), registry.posts(), "u1");

    assert_eq!(removed, 2);
    assert!(registry.users().is_empty());
    assert!(registry.posts().has(keys::posts("all", None)));
}

#[tokio::test]
async fn test_image_invalidation_drops_renditions() {
    let (_app, registry) = create_test_app();
    let url = "https://img.example.com/a.jpg";
    let images = registry.images();
    images.set(keys::image(url), image(url, 2_048));
    images.set(keys::thumbnail(url, 200, 200), image(url, 256));
    images.set(keys::thumbnail(url, 64, 64), image(url, 64));
    images.set(keys::image("https://img.example.com/b.jpg"), image(url, 128));

    let removed = invalidation::invalidate_image(images, url);

    assert_eq!(removed, 3);
    assert_eq!(images.size(), 1);
}

#[tokio::test]
async fn test_clear_all_and_destroy() {
    let (_app, registry) = create_test_app();
    seed_posts(&registry);
    registry.users().set(keys::user("u1"), user("u1"));

    invalidation::clear_all(&registry);
    for name in CacheName::ALL {
        assert!(registry.get(name).is_empty(), "{} not empty", name);
    }

    registry.destroy();
    registry.destroy();
    assert!(registry.is_destroyed());
}
