//! Cache registry - the application's named caches.
//!
//! One container owns the four preconfigured caches for the lifetime of the
//! application. It is built once at startup, handed to whoever needs it, and
//! torn down with [`CacheRegistry::destroy`] on shutdown.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::cache::{
    Cache, CacheKey, CacheMetrics, CacheOptions, CleanupReport, Clock, EstimateSize, SystemClock,
    MB,
};
use crate::error::{CacheError, Result};
use crate::models::{CachedImage, NotificationCacheValue, PostCacheValue, UserProfile};

// == Cache Name ==
/// Names of the registered caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheName {
    Image,
    Post,
    User,
    Notification,
}

impl CacheName {
    pub const ALL: [CacheName; 4] = [
        CacheName::Image,
        CacheName::Post,
        CacheName::User,
        CacheName::Notification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheName::Image => "image",
            CacheName::Post => "post",
            CacheName::User => "user",
            CacheName::Notification => "notification",
        }
    }

    /// Budgets for this cache.
    ///
    /// | name | ttl | max size | max entries |
    /// |---|---|---|---|
    /// | image | 1 h | 100 MB | 500 |
    /// | post | 10 min | 20 MB | 200 |
    /// | user | 30 min | 10 MB | 300 |
    /// | notification | 5 min | 5 MB | 100 |
    pub fn preset(&self) -> CacheOptions {
        match self {
            CacheName::Image => CacheOptions::new()
                .ttl(Duration::from_secs(60 * 60))
                .max_size(100 * MB)
                .max_entries(500),
            CacheName::Post => CacheOptions::new()
                .ttl(Duration::from_secs(10 * 60))
                .max_size(20 * MB)
                .max_entries(200),
            CacheName::User => CacheOptions::new()
                .ttl(Duration::from_secs(30 * 60))
                .max_size(10 * MB)
                .max_entries(300),
            CacheName::Notification => CacheOptions::new()
                .ttl(Duration::from_secs(5 * 60))
                .max_size(5 * MB)
                .max_entries(100)
                .cleanup_interval(Duration::from_secs(30)),
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheName {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        CacheName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CacheError::UnknownCache(s.to_string()))
    }
}

// == Managed Cache ==
/// Value-agnostic view of a cache, for administration.
pub trait ManagedCache: Send + Sync {
    fn name(&self) -> &str;
    fn metrics(&self) -> CacheMetrics;
    fn keys(&self) -> Vec<CacheKey>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn delete_key(&self, key: CacheKey) -> bool;
    fn clear(&self);
    fn cleanup(&self) -> CleanupReport;
    fn destroy(&self);
}

impl<T> ManagedCache for Cache<T>
where
    T: Clone + EstimateSize + Send + 'static,
{
    fn name(&self) -> &str {
        Cache::name(self)
    }

    fn metrics(&self) -> CacheMetrics {
        self.get_metrics()
    }

    fn keys(&self) -> Vec<CacheKey> {
        self.get_keys()
    }

    fn len(&self) -> usize {
        self.size()
    }

    fn delete_key(&self, key: CacheKey) -> bool {
        self.delete(key)
    }

    fn clear(&self) {
        Cache::clear(self)
    }

    fn cleanup(&self) -> CleanupReport {
        Cache::cleanup(self)
    }

    fn destroy(&self) {
        Cache::destroy(self)
    }
}

// == Cache Registry ==
/// Application container for the named caches.
pub struct CacheRegistry {
    images: Cache<CachedImage>,
    posts: Cache<PostCacheValue>,
    users: Cache<UserProfile>,
    notifications: Cache<NotificationCacheValue>,
    destroyed: AtomicBool,
}

impl CacheRegistry {
    // == Constructors ==
    /// Builds the four caches with their preset budgets.
    pub fn init() -> Result<Self> {
        Self::with_presets(|_, options| options)
    }

    /// Builds the caches, letting `adjust` override each preset.
    pub fn with_presets<F>(adjust: F) -> Result<Self>
    where
        F: Fn(CacheName, CacheOptions) -> CacheOptions,
    {
        Self::with_clock(Arc::new(SystemClock), adjust)
    }

    /// Builds the caches on a shared time source.
    pub fn with_clock<F>(clock: Arc<dyn Clock>, adjust: F) -> Result<Self>
    where
        F: Fn(CacheName, CacheOptions) -> CacheOptions,
    {
        let options = |name: CacheName| adjust(name, name.preset());

        let registry = Self {
            images: Cache::with_clock(
                CacheName::Image.as_str(),
                options(CacheName::Image),
                clock.clone(),
            )?,
            posts: Cache::with_clock(
                CacheName::Post.as_str(),
                options(CacheName::Post),
                clock.clone(),
            )?,
            users: Cache::with_clock(
                CacheName::User.as_str(),
                options(CacheName::User),
                clock.clone(),
            )?,
            notifications: Cache::with_clock(
                CacheName::Notification.as_str(),
                options(CacheName::Notification),
                clock,
            )?,
            destroyed: AtomicBool::new(false),
        };

        info!("Cache registry initialized");
        Ok(registry)
    }

    // == Accessors ==
    pub fn images(&self) -> &Cache<CachedImage> {
        &self.images
    }

    pub fn posts(&self) -> &Cache<PostCacheValue> {
        &self.posts
    }

    pub fn users(&self) -> &Cache<UserProfile> {
        &self.users
    }

    pub fn notifications(&self) -> &Cache<NotificationCacheValue> {
        &self.notifications
    }

    /// Value-agnostic handle to a cache by name.
    pub fn get(&self, name: CacheName) -> &dyn ManagedCache {
        match name {
            CacheName::Image => &self.images,
            CacheName::Post => &self.posts,
            CacheName::User => &self.users,
            CacheName::Notification => &self.notifications,
        }
    }

    /// Like [`get`](Self::get), resolving the name from a string.
    pub fn lookup(&self, name: &str) -> Result<&dyn ManagedCache> {
        let name: CacheName = name.parse()?;
        Ok(self.get(name))
    }

    // == Bulk Operations ==
    /// Metrics of every cache, in name order.
    pub fn metrics(&self) -> Vec<(CacheName, CacheMetrics)> {
        CacheName::ALL
            .into_iter()
            .map(|name| (name, self.get(name).metrics()))
            .collect()
    }

    /// Clears every cache.
    pub fn clear_all(&self) {
        for name in CacheName::ALL {
            self.get(name).clear();
        }
        info!("All caches cleared");
    }

    /// Runs a cleanup pass on every cache.
    pub fn cleanup_all(&self) -> Vec<(CacheName, CleanupReport)> {
        CacheName::ALL
            .into_iter()
            .map(|name| (name, self.get(name).cleanup()))
            .collect()
    }

    // == Lifecycle ==
    /// Stops every cleanup task and drops every entry. Idempotent.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        for name in CacheName::ALL {
            self.get(name).destroy();
        }
        info!("Cache registry destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::keys;
    use crate::models::entities::fixtures;
    use crate::models::PostKind;

    #[test]
    fn test_presets_match_budget_table() {
        let image = CacheName::Image.preset();
        assert_eq!(image.ttl, Duration::from_secs(3600));
        assert_eq!(image.max_size, 100 * 1024 * 1024);
        assert_eq!(image.max_entries, 500);

        let post = CacheName::Post.preset();
        assert_eq!(post.ttl, Duration::from_secs(600));
        assert_eq!(post.max_size, 20 * 1024 * 1024);
        assert_eq!(post.max_entries, 200);

        let user = CacheName::User.preset();
        assert_eq!(user.ttl, Duration::from_secs(1800));
        assert_eq!(user.max_size, 10 * 1024 * 1024);
        assert_eq!(user.max_entries, 300);

        let notification = CacheName::Notification.preset();
        assert_eq!(notification.ttl, Duration::from_secs(300));
        assert_eq!(notification.max_size, 5 * 1024 * 1024);
        assert_eq!(notification.max_entries, 100);
    }

    #[test]
    fn test_cache_name_parse() {
        assert_eq!("post".parse::<CacheName>().unwrap(), CacheName::Post);
        assert!(matches!(
            "videos".parse::<CacheName>(),
            Err(CacheError::UnknownCache(_))
        ));
    }

    #[test]
    fn test_init_builds_independent_caches() {
        let registry = CacheRegistry::init().unwrap();

        registry
            .posts()
            .set(keys::post("p1"), PostCacheValue::Post(fixtures::post("p1", PostKind::Lost)));
        registry.users().set(keys::user("u1"), fixtures::user("u1"));

        assert_eq!(registry.posts().size(), 1);
        assert_eq!(registry.users().size(), 1);
        assert_eq!(registry.images().size(), 0);
        assert!(registry.users().get(keys::post("p1")).is_none());
        assert_eq!(registry.get(CacheName::Post).name(), "post");
    }

    #[test]
    fn test_with_presets_overrides() {
        let registry = CacheRegistry::with_presets(|name, options| match name {
            CacheName::User => options.max_entries(2),
            _ => options,
        })
        .unwrap();

        assert_eq!(registry.users().options().max_entries, 2);
        assert_eq!(registry.posts().options().max_entries, 200);
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = CacheRegistry::init().unwrap();
        assert_eq!(registry.lookup("notification").unwrap().name(), "notification");
        assert!(registry.lookup("nope").is_err());
    }

    #[test]
    fn test_metrics_listing() {
        let registry = CacheRegistry::init().unwrap();
        registry.users().get(keys::user("missing"));

        let metrics = registry.metrics();
        assert_eq!(metrics.len(), 4);
        let (name, user_metrics) = &metrics[2];
        assert_eq!(*name, CacheName::User);
        assert_eq!(user_metrics.misses, 1);
    }

    #[test]
    fn test_cleanup_all_reaps_expired() {
        let clock = Arc::new(ManualClock::new(0));
        let registry = CacheRegistry::with_clock(clock.clone(), |_, o| o).unwrap();

        registry.notifications().set(
            keys::unread_notifications("u1"),
            NotificationCacheValue::UnreadCount(2),
        );
        registry.users().set(keys::user("u1"), fixtures::user("u1"));

        // Past the 5 minute notification TTL, within the 30 minute user TTL
        clock.advance(Duration::from_secs(6 * 60));
        let reports = registry.cleanup_all();

        let notification = reports
            .iter()
            .find(|(name, _)| *name == CacheName::Notification)
            .unwrap();
        assert_eq!(notification.1.expired, 1);
        assert_eq!(registry.users().size(), 1);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let registry = CacheRegistry::init().unwrap();
        registry.users().set(keys::user("u1"), fixtures::user("u1"));

        registry.destroy();
        registry.destroy();

        assert!(registry.is_destroyed());
        assert_eq!(registry.users().size(), 0);
    }

    #[tokio::test]
    async fn test_destroy_stops_schedulers() {
        let registry = CacheRegistry::init().unwrap();
        assert!(registry.images().is_scheduler_running());

        registry.destroy();

        assert!(!registry.images().is_scheduler_running());
        assert!(!registry.notifications().is_scheduler_running());
    }
}
