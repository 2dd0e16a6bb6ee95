//! Session token claims.

use serde::{Deserialize, Serialize};

/// Session lifetime (15 minutes)
pub const DEFAULT_SESSION_EXPIRY_SECONDS: i64 = 900;

/// Issuer embedded in every session token
pub const SESSION_ISSUER: &str = "passport";

/// Claims carried by a signed session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub uid: i64,

    /// User-Agent of the client the session was issued to
    pub fingerprint: String,

    /// Issued at (unix seconds)
    pub iat: i64,

    /// Expires at (unix seconds)
    pub exp: i64,

    pub iss: String,
}

impl SessionClaims {
    pub fn new(uid: i64, fingerprint: impl Into<String>, issued_at: i64, ttl_seconds: i64, issuer: impl Into<String>) -> Self {
        Self {
            uid,
            fingerprint: fingerprint.into(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            iss: issuer.into(),
        }
    }

    /// Expired strictly after `exp`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}
