//! Verification code entity for phone-based confirmation flows.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Wrong guesses allowed before a code is locked
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (10 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: u64 = 600;

/// Default minimum interval between two sends to the same pair
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u64 = 60;

/// A code issued for one (business, phone) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Business context the code belongs to, e.g. `login`
    pub business: String,

    /// Phone number the code was sent to
    pub phone: String,

    /// SHA-256 of the 6-digit code; the plain code is never kept
    pub code_hash: String,

    pub created_at: DateTime<Utc>,

    /// Wrong guesses still allowed
    pub attempts_remaining: u32,
}

impl VerificationCode {
    /// Record `code` as the live code for the pair
    pub fn issue(
        business: impl Into<String>,
        phone: impl Into<String>,
        code: &str,
        max_attempts: u32,
    ) -> Self {
        Self {
            business: business.into(),
            phone: phone.into(),
            code_hash: Self::hash_code(code),
            created_at: Utc::now(),
            attempts_remaining: max_attempts,
        }
    }

    /// Uniform over 000000..=999999
    pub fn generate_code() -> String {
        let value: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{:06}", value)
    }

    /// SHA-256 digest of a code, hex encoded; codes are only stored in this form
    pub fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts_remaining == 0
    }

    /// Compare `input` with the stored hash in constant time
    pub fn matches(&self, input: &str) -> bool {
        constant_time_eq(Self::hash_code(input).as_bytes(), self.code_hash.as_bytes())
    }

    /// Consume one attempt after a wrong guess; returns what is left
    pub fn record_failure(&mut self) -> u32 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        self.attempts_remaining
    }

    /// Store key for a pair, `phone_code:{business}:{phone}`
    pub fn storage_key(business: &str, phone: &str) -> String {
        format!("phone_code:{}:{}", business, phone)
    }
}
