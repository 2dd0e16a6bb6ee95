//! Session signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session configuration
///
/// The signing secret is held here and handed to the session service at
/// construction; nothing else in the process keeps a copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HS256 signing
    pub secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_session_expiry")]
    pub session_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            session_expiry: default_session_expiry(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session expiry in minutes
    pub fn with_session_expiry_minutes(mut self, minutes: i64) -> Self {
        self.session_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn default_session_expiry() -> i64 {
    900 // 15 minutes
}

fn default_issuer() -> String {
    String::from("passport")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.session_expiry, 900);
        assert!(config.is_using_default_secret());

        let custom = JwtConfig::new("s3cret").with_session_expiry_minutes(5);
        assert_eq!(custom.session_expiry, 300);
        assert!(!custom.is_using_default_secret());
    }
}
