//! In-memory code store
//!
//! Uses `tokio::time::Instant` so tests can drive expiry and cooldown with a
//! paused clock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{CodeError, DomainError, DomainResult};

use super::trait_::{CodeRepository, CodeStorePolicy, CodeVerification};

#[derive(Debug, Clone)]
struct StoredCode {
    record: VerificationCode,
    issued_at: Instant,
    expires_at: Instant,
}

/// Mock code repository for testing and local development
pub struct MockCodeRepository {
    codes: Arc<Mutex<HashMap<String, StoredCode>>>,
    policy: CodeStorePolicy,
    unavailable: AtomicBool,
}

impl MockCodeRepository {
    pub fn new(policy: CodeStorePolicy) -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            policy,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Attempts left for the live code of a pair, if any
    pub async fn attempts_remaining(&self, business: &str, phone: &str) -> Option<u32> {
        let key = VerificationCode::storage_key(business, phone);
        let now = Instant::now();
        self.codes
            .lock()
            .await
            .get(&key)
            .filter(|stored| now < stored.expires_at)
            .map(|stored| stored.record.attempts_remaining)
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock code store marked unavailable"));
        }
        Ok(())
    }
}

impl Default for MockCodeRepository {
    fn default() -> Self {
        Self::new(CodeStorePolicy::default())
    }
}

#[async_trait]
impl CodeRepository for MockCodeRepository {
    async fn store(&self, business: &str, phone: &str, code: &str) -> DomainResult<()> {
        self.check_available()?;

        let key = VerificationCode::storage_key(business, phone);
        let now = Instant::now();
        let mut codes = self.codes.lock().await;

        if let Some(existing) = codes.get(&key) {
            let live = now < existing.expires_at;
            let cooling_down = now < existing.issued_at + self.policy.resend_cooldown;
            if live && !existing.record.is_exhausted() && cooling_down {
                return Err(CodeError::SendTooFrequent.into());
            }
        }

        codes.insert(
            key,
            StoredCode {
                record: VerificationCode::issue(business, phone, code, self.policy.max_attempts),
                issued_at: now,
                expires_at: now + self.policy.expiry,
            },
        );
        Ok(())
    }

    async fn verify(&self, business: &str, phone: &str, input: &str) -> DomainResult<CodeVerification> {
        self.check_available()?;

        let key = VerificationCode::storage_key(business, phone);
        let now = Instant::now();
        let mut codes = self.codes.lock().await;

        if codes.get(&key).is_some_and(|stored| now >= stored.expires_at) {
            codes.remove(&key);
        }
        let Some(stored) = codes.get_mut(&key) else {
            return Err(CodeError::CodeNotFound.into());
        };

        if stored.record.is_exhausted() {
            return Err(CodeError::TooManyAttempts.into());
        }

        if stored.record.matches(input) {
            codes.remove(&key);
            return Ok(CodeVerification::Matched);
        }

        let remaining = stored.record.record_failure();
        Ok(CodeVerification::Mismatched { remaining })
    }
}
