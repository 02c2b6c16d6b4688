//! API Response types
//!
//! Standardized response structures for the whole API surface.
//!
//! Every endpoint answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "...",
//!     "data": { ... }
//! }
//! ```
//! Failures carry `success: false`, a human-readable `message` and a
//! machine-readable `error` kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (absent on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Machine-readable error kind (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response with a custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: Some(kind.into()),
        }
    }
}

/// Unpaginated list response (`GET /menu`)
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Paginated list response (`GET /orders`)
#[derive(Debug, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub success: bool,
    /// Items on this page
    pub count: usize,
    /// Total matching items
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Total pages
    pub pages: u32,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            success: true,
            count: data.len(),
            total,
            page,
            pages,
            data,
        }
    }
}

/// Public view of a user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// POST /auth/login response body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        let resp: PagedResponse<u8> = PagedResponse::new(vec![1, 2, 3], 1, 10, 23);
        assert_eq!(resp.count, 3);
        assert_eq!(resp.pages, 3);

        let empty: PagedResponse<u8> = PagedResponse::new(vec![], 1, 10, 0);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn test_envelope_skips_absent_fields() {
        let json = serde_json::to_string(&ApiResponse::ok(1)).unwrap();
        assert_eq!(json, r#"{"success":true,"data":1}"#);

        let err = serde_json::to_string(&ApiResponse::<()>::error("NOT_FOUND", "missing")).unwrap();
        assert!(err.contains(r#""success":false"#));
        assert!(err.contains(r#""error":"NOT_FOUND""#));
        assert!(!err.contains("data"));
    }
}
