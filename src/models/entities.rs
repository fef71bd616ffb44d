//! Domain entities held in the application caches.
//!
//! These mirror the documents the app reads from its backing store. Only the
//! fields the clients render are modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{string_size, EstimateSize};

/// Whether a post reports a lost or a found item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Lost,
    Found,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Lost => "lost",
            PostKind::Found => "found",
        }
    }
}

/// Lifecycle of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Open,
    Claimed,
    Resolved,
}

/// A lost or found item report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub kind: PostKind,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub image_urls: Vec<String>,
    pub owner_id: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

impl EstimateSize for Post {
    fn estimate_size(&self) -> usize {
        [
            &self.id,
            &self.title,
            &self.description,
            &self.category,
            &self.location,
            &self.owner_id,
        ]
        .iter()
        .map(|s| string_size(s.len()))
        .sum::<usize>()
            + self.image_urls.estimate_size()
            + self.created_at.estimate_size()
            // kind + status
            + 2 * 8
    }
}

/// What the post cache holds: a single post or a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PostCacheValue {
    Post(Post),
    List(Vec<Post>),
}

impl EstimateSize for PostCacheValue {
    fn estimate_size(&self) -> usize {
        match self {
            PostCacheValue::Post(post) => post.estimate_size(),
            PostCacheValue::List(posts) => posts.estimate_size(),
        }
    }
}

/// Public profile of an app user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl EstimateSize for UserProfile {
    fn estimate_size(&self) -> usize {
        self.uid.estimate_size()
            + self.display_name.estimate_size()
            + self.email.estimate_size()
            + self.photo_url.estimate_size()
            + self.phone.estimate_size()
            + self.is_admin.estimate_size()
            + self.created_at.estimate_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    ClaimRequest,
    ClaimApproved,
    ClaimRejected,
    System,
}

/// In-app notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub post_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl EstimateSize for Notification {
    fn estimate_size(&self) -> usize {
        self.id.estimate_size()
            + self.recipient_id.estimate_size()
            + self.message.estimate_size()
            + self.post_id.estimate_size()
            + self.read.estimate_size()
            + self.created_at.estimate_size()
            + 8
    }
}

/// What the notification cache holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NotificationCacheValue {
    List(Vec<Notification>),
    UnreadCount(u64),
}

impl EstimateSize for NotificationCacheValue {
    fn estimate_size(&self) -> usize {
        match self {
            NotificationCacheValue::List(items) => items.estimate_size(),
            NotificationCacheValue::UnreadCount(count) => count.estimate_size(),
        }
    }
}

/// Image bytes fetched from the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub url: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl EstimateSize for CachedImage {
    fn estimate_size(&self) -> usize {
        // Raw bytes are charged 1:1, not through the per-element heuristic
        self.bytes.len()
            + self.url.estimate_size()
            + self.content_type.estimate_size()
            + self.width.estimate_size()
            + self.height.estimate_size()
    }
}
