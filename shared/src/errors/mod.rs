//! Shared error response structure
//!
//! Every failure that leaves the service is rendered as an [`ErrorResponse`]
//! carrying a stable machine-readable code and a human-readable message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes exposed to callers. Values are part of the public contract
/// and must not change once released.
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_EMAIL: &str = "INVALID_EMAIL";
    pub const INVALID_PASSWORD: &str = "INVALID_PASSWORD";
    pub const PASSWORD_MISMATCH: &str = "PASSWORD_MISMATCH";
    pub const FIELD_TOO_LONG: &str = "FIELD_TOO_LONG";
    pub const INVALID_DATE: &str = "INVALID_DATE";
    pub const INVALID_PHONE: &str = "INVALID_PHONE";

    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const EMAIL_ALREADY_REGISTERED: &str = "EMAIL_ALREADY_REGISTERED";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";

    pub const CODE_SEND_TOO_FREQUENT: &str = "CODE_SEND_TOO_FREQUENT";
    pub const CODE_TOO_MANY_ATTEMPTS: &str = "CODE_TOO_MANY_ATTEMPTS";
    pub const CODE_NOT_FOUND: &str = "CODE_NOT_FOUND";
    pub const SMS_ERROR: &str = "SMS_ERROR";

    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const SESSION_TAMPERED: &str = "SESSION_TAMPERED";
    pub const SESSION_FINGERPRINT_MISMATCH: &str = "SESSION_FINGERPRINT_MISMATCH";
    pub const SESSION_ISSUE_FAILED: &str = "SESSION_ISSUE_FAILED";

    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let response = ErrorResponse::new(error_codes::FIELD_TOO_LONG, "Nickname is too long")
            .add_detail("field", "nickname")
            .add_detail("max", 15);

        assert_eq!(response.error, "FIELD_TOO_LONG");
        let details = response.details.unwrap();
        assert_eq!(details["field"], "nickname");
        assert_eq!(details["max"], 15);
    }

    #[test]
    fn test_details_skipped_when_empty() {
        let response = ErrorResponse::new(error_codes::INTERNAL_ERROR, "boom");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }
}
