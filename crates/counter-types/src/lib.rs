use serde::{Deserialize, Serialize};

/// Per-user counter, matching the `counters` table column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Counter {
    pub email: String,
    pub count: i32,
    pub mycount: i32,
}

impl Counter {
    /// A fresh zero-valued counter for `email`.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            count: 0,
            mycount: 0,
        }
    }
}

/// Identity carried inside the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: String,
    pub picture: Option<String>,
}

// ============================================================================
// Auth API Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedInResponse {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl LoggedInResponse {
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            user: None,
        }
    }

    pub fn logged_in(user: SessionUser) -> Self {
        Self {
            logged_in: true,
            user: Some(user),
        }
    }
}

/// Plain `{ message }` body used for logout and every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Posts API Types
// ============================================================================

/// Upstream items are forwarded untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counter_is_zeroed() {
        let counter = Counter::new("a@example.com");
        assert_eq!(counter.email, "a@example.com");
        assert_eq!(counter.count, 0);
        assert_eq!(counter.mycount, 0);
    }

    #[test]
    fn test_logged_out_omits_user() {
        let json = serde_json::to_value(LoggedInResponse::logged_out()).unwrap();
        assert_eq!(json, serde_json::json!({ "loggedIn": false }));
    }

    #[test]
    fn test_logged_in_uses_camel_case_flag() {
        let user = SessionUser {
            name: Some("Ada".to_string()),
            email: "ada@example.com".to_string(),
            picture: None,
        };
        let json = serde_json::to_value(LoggedInResponse::logged_in(user)).unwrap();
        assert_eq!(json["loggedIn"], true);
        assert_eq!(json["user"]["email"], "ada@example.com");
    }
}
