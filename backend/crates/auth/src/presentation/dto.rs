//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty strings so that missing fields reach
//! the declarative validation step instead of failing JSON extraction.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

// ============================================================================
// Common
// ============================================================================

/// Plain message response
#[derive(Debug, Clone, Serialize)]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_defaults_missing_fields() {
        let req: SignUpRequest = serde_json::from_str(r#"{"nickname":"Dev"}"#).unwrap();
        assert_eq!(req.nickname, "Dev");
        assert_eq!(req.password, "");
        assert_eq!(req.confirm, "");
    }

    #[test]
    fn test_sign_in_response_shape() {
        let json = serde_json::to_value(SignInResponse {
            token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "token": "abc" }));
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "ok" }));
    }
}
