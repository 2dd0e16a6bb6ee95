//! Main session service implementation

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use pp_shared::JwtConfig;

use crate::domain::entities::session::SessionClaims;
use crate::domain::entities::user::User;
use crate::errors::SessionError;

/// Issues and validates session tokens
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    session_expiry: i64,
}

impl SessionService {
    /// Creates a session service signing with the secret held in `config`
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        // Expiry is checked against an explicit clock in `validate_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            session_expiry: config.session_expiry,
        }
    }

    /// Issue a session token for `user`, bound to `fingerprint`
    pub fn issue(&self, user: &User, fingerprint: &str) -> Result<String, SessionError> {
        self.issue_at(user.id, fingerprint, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(&self, uid: i64, fingerprint: &str, now: i64) -> Result<String, SessionError> {
        let claims = SessionClaims::new(uid, fingerprint, now, self.session_expiry, self.issuer.as_str());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, uid = uid, event = "session_issue_failed", "Failed to sign session token");
            SessionError::IssueFailed
        })
    }

    /// Validate `token` presented by `fingerprint` and return the user id
    pub fn validate(&self, token: &str, fingerprint: &str) -> Result<i64, SessionError> {
        self.validate_at(token, fingerprint, Utc::now().timestamp())
            .map(|claims| claims.uid)
    }

    /// Validate as if the current time were `now` (unix seconds)
    ///
    /// Checks run in order: signature and shape (`Tampered`), expiry
    /// (`Expired`), then client binding (`FingerprintMismatch`).
    pub fn validate_at(&self, token: &str, fingerprint: &str, now: i64) -> Result<SessionClaims, SessionError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, event = "session_rejected", "Session token failed verification");
                SessionError::Tampered
            })?;

        if claims.is_expired_at(now) {
            return Err(SessionError::Expired);
        }

        if claims.fingerprint != fingerprint {
            tracing::warn!(uid = claims.uid, event = "session_fingerprint_mismatch", "Session presented by a different client");
            return Err(SessionError::FingerprintMismatch);
        }

        Ok(claims)
    }
}
