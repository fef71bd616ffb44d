//! Invalidation helpers.
//!
//! Invalidation is coarse: changing an entity also drops a fixed list of
//! aggregate keys that might contain it, whether or not they actually do.
//! Callers rely on that over-invalidation. There is no per-entity dependency
//! tracking.

use tracing::debug;

use crate::cache::{Cache, CacheKey, EstimateSize};
use crate::keys;
use crate::models::{CachedImage, NotificationCacheValue, PostCacheValue, UserProfile};
use crate::registry::CacheRegistry;

/// Aggregate listing keys touched by any post change.
pub fn post_list_keys() -> Vec<CacheKey> {
    keys::LIST_KINDS
        .iter()
        .map(|kind| keys::posts(kind, None))
        .collect()
}

fn delete_all<T>(cache: &Cache<T>, keys: impl IntoIterator<Item = CacheKey>) -> usize
where
    T: Clone + EstimateSize + Send + 'static,
{
    keys.into_iter()
        .map(|key| cache.delete(key))
        .filter(|removed| *removed)
        .count()
}

/// Drops a post and the `all`/`lost`/`found` listings.
pub fn invalidate_post(posts: &Cache<PostCacheValue>, post_id: &str) -> usize {
    let mut targets = vec![keys::post(post_id)];
    targets.extend(post_list_keys());

    let removed = delete_all(posts, targets);
    debug!(post_id, removed, "Invalidated post");
    removed
}

/// Drops a user's own listing and the shared listings.
pub fn invalidate_user_posts(posts: &Cache<PostCacheValue>, uid: &str) -> usize {
    let mut targets = vec![keys::user_posts(uid)];
    targets.extend(post_list_keys());

    let removed = delete_all(posts, targets);
    debug!(uid, removed, "Invalidated user posts");
    removed
}

/// Drops a user profile and the user's post listing.
pub fn invalidate_user(
    users: &Cache<UserProfile>,
    posts: &Cache<PostCacheValue>,
    uid: &str,
) -> usize {
    let removed =
        delete_all(users, [keys::user(uid)]) + delete_all(posts, [keys::user_posts(uid)]);
    debug!(uid, removed, "Invalidated user");
    removed
}

/// Drops a user's notification list and unread count.
pub fn invalidate_notifications(
    notifications: &Cache<NotificationCacheValue>,
    uid: &str,
) -> usize {
    let removed = delete_all(
        notifications,
        [keys::notifications(uid), keys::unread_notifications(uid)],
    );
    debug!(uid, removed, "Invalidated notifications");
    removed
}

/// Drops an image and every cached rendition of it.
pub fn invalidate_image(images: &Cache<CachedImage>, url: &str) -> usize {
    let mut targets = vec![keys::image(url)];
    targets.extend(
        images
            .get_keys()
            .into_iter()
            .filter(|key| keys::is_thumbnail_of(key, url)),
    );

    let removed = delete_all(images, targets);
    debug!(url, removed, "Invalidated image");
    removed
}

/// Empties every cache in the registry.
pub fn clear_all(registry: &CacheRegistry) {
    registry.clear_all();
}
