//! Key builders for the application caches.
//!
//! Pure and deterministic: the same identifiers always yield the same key.

use crate::cache::CacheKey;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Listing kinds the app queries and invalidates.
pub const LIST_KINDS: [&str; 3] = ["all", "lost", "found"];

/// Key of an image fetched from `url`.
pub fn image(url: &str) -> CacheKey {
    CacheKey::Str(format!("image_{}", url))
}

/// Key of a resized rendition of the image at `url`.
///
/// `#` separates the size so renditions of one URL never share a prefix
/// with a longer URL such as `<url>_v2.jpg`.
pub fn thumbnail(url: &str, width: u32, height: u32) -> CacheKey {
    CacheKey::Str(format!("image_{}#{}x{}", url, width, height))
}

/// Whether `key` is a rendition built by [`thumbnail`] for exactly `url`.
pub fn is_thumbnail_of(key: &CacheKey, url: &str) -> bool {
    let Some(dims) = key
        .as_str()
        .and_then(|k| k.strip_prefix("image_"))
        .and_then(|k| k.strip_prefix(url))
        .and_then(|k| k.strip_prefix('#'))
    else {
        return false;
    };

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    dims.split_once('x')
        .is_some_and(|(w, h)| is_number(w) && is_number(h))
}

/// Key of a single post.
pub fn post(id: &str) -> CacheKey {
    CacheKey::Str(format!("post_{}", id))
}

/// Key of a post listing.
///
/// `kind` is `all`, `lost` or `found`. A missing category, or `all`, maps to
/// the plain `posts_<kind>` key.
pub fn posts(kind: &str, category: Option<&str>) -> CacheKey {
    match category {
        None | Some(ALL_CATEGORIES) => CacheKey::Str(format!("posts_{}", kind)),
        Some(category) => CacheKey::Str(format!("posts_{}_{}", kind, category)),
    }
}

/// Key of the listing of posts created by one user.
pub fn user_posts(uid: &str) -> CacheKey {
    CacheKey::Str(format!("user_posts_{}", uid))
}

/// Key of a user profile.
pub fn user(uid: &str) -> CacheKey {
    CacheKey::Str(format!("user_{}", uid))
}

/// Key of a user's notification list.
pub fn notifications(uid: &str) -> CacheKey {
    CacheKey::Str(format!("notifications_{}", uid))
}

/// Key of a user's unread-notification count.
pub fn unread_notifications(uid: &str) -> CacheKey {
    CacheKey::Str(format!("notifications_unread_{}", uid))
}
