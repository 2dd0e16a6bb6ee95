//! Code store trait: one outstanding verification code per (business, phone).
//!
//! Implementations must make `store` and `verify` atomic per pair so several
//! service instances can share one backing store.

use async_trait::async_trait;
use std::time::Duration;

use pp_shared::VerificationConfig;

use crate::domain::entities::verification_code::{
    DEFAULT_EXPIRATION_SECONDS, DEFAULT_RESEND_COOLDOWN_SECONDS, MAX_ATTEMPTS,
};
use crate::errors::DomainResult;

/// Timing and attempt limits applied by a code store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStorePolicy {
    /// How long a code stays verifiable
    pub expiry: Duration,
    /// Minimum interval between two sends for the same pair
    pub resend_cooldown: Duration,
    /// Wrong guesses allowed per code
    pub max_attempts: u32,
}

impl Default for CodeStorePolicy {
    fn default() -> Self {
        Self {
            expiry: Duration::from_secs(DEFAULT_EXPIRATION_SECONDS),
            resend_cooldown: Duration::from_secs(DEFAULT_RESEND_COOLDOWN_SECONDS),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&VerificationConfig> for CodeStorePolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            expiry: Duration::from_secs(config.code_expiry_seconds),
            resend_cooldown: Duration::from_secs(config.resend_cooldown_seconds),
            max_attempts: config.max_attempts,
        }
    }
}

/// Outcome of checking a submitted code against a live one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeVerification {
    /// The code matched and has been consumed
    Matched,
    /// The code did not match; `remaining` wrong guesses are left
    Mismatched { remaining: u32 },
}

#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Persist `code` as the live code for the pair
    ///
    /// Overwrites the previous code once the resend cooldown has elapsed, or
    /// immediately when the previous code is exhausted or gone.
    ///
    /// # Errors
    /// * `CodeError::SendTooFrequent` - a code was stored within the cooldown
    /// * `DomainError::StoreUnavailable` - the backing store failed
    async fn store(&self, business: &str, phone: &str, code: &str) -> DomainResult<()>;

    /// Check `input` against the live code for the pair
    ///
    /// A match deletes the code. A mismatch consumes one attempt.
    ///
    /// # Errors
    /// * `CodeError::TooManyAttempts` - no attempts left, regardless of `input`
    /// * `CodeError::CodeNotFound` - nothing was issued or it expired
    /// * `DomainError::StoreUnavailable` - the backing store failed
    async fn verify(&self, business: &str, phone: &str, input: &str) -> DomainResult<CodeVerification>;
}
