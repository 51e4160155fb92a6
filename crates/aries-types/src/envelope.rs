//! Wire envelopes shared by all API endpoints.
//!
//! List endpoints return a [`Page`]; single-entity endpoints return an
//! [`Envelope`]; mutations without a payload return an [`Ack`].

use serde::{Deserialize, Serialize};

use crate::user::{Profile, User};

/// One page of a paginated list response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Entities in server-defined order. Never re-sorted locally.
    pub results: Vec<T>,
    /// Total number of matching entities across all pages.
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    /// 1-based page number this window represents.
    pub page: u32,
    pub total_pages: u32,
}

/// Envelope around a single-entity response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    /// Present when `success` is true.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Acknowledgement for mutations that carry no entity payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the auth endpoints (`login`, `register`, `me`).
///
/// The token is only present on login and register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub profile: Profile,
    #[serde(default)]
    pub token: Option<String>,
}

/// Client-side description of the window `items` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            total_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_drf_shape() {
        let json = serde_json::json!({
            "results": [{"id": 1, "username": "a", "email": "a@x.com"}],
            "count": 5,
            "page": 1,
            "total_pages": 3
        });
        let page: Page<User> = serde_json::from_value(json).unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.count, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_envelope_failure_has_no_data() {
        let json = serde_json::json!({
            "success": false,
            "message": "tournament is full"
        });
        let env: Envelope<User> = serde_json::from_value(json).unwrap();

        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("tournament is full"));
    }
}
