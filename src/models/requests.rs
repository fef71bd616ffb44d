//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Entity whose cached data should be invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationTarget {
    Post,
    UserPosts,
    User,
    Notifications,
    Image,
}

/// Request body for POST /invalidate
///
/// # Fields
/// - `target`: Which invalidation helper to run
/// - `id`: Post id, user id or image URL depending on `target`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    pub target: InvalidationTarget,
    pub id: String,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("id cannot be empty".to_string());
        }
        if self.id.len() > 2048 {
            return Some("id exceeds maximum length of 2048 characters".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_request_deserialize() {
        let json = r#"{"target": "user_posts", "id": "u1"}"#;
        let req: InvalidateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target, InvalidationTarget::UserPosts);
        assert_eq!(req.id, "u1");
    }

    #[test]
    fn test_unknown_target_rejected() {
        let json = r#"{"target": "comments", "id": "c1"}"#;
        assert!(serde_json::from_str::<InvalidateRequest>(json).is_err());
    }

    #[test]
    fn test_validate_empty_id() {
        let req = InvalidateRequest {
            target: InvalidationTarget::Post,
            id: "  ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = InvalidateRequest {
            target: InvalidationTarget::Image,
            id: "https://img.example/a.jpg".to_string(),
        };
        assert!(req.validate().is_none());
    }
}
