//! Main code service implementation

use std::sync::Arc;

use pp_shared::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{CodeError, DomainError, DomainResult, ValidationError};
use crate::repositories::{CodeRepository, CodeVerification};

use super::config::CodeServiceConfig;
use super::traits::SmsSender;

/// Service for sending and verifying phone verification codes
pub struct CodeService<R: CodeRepository, S: SmsSender + ?Sized> {
    repository: Arc<R>,
    sms_sender: Arc<S>,
    config: CodeServiceConfig,
}

impl<R: CodeRepository, S: SmsSender + ?Sized> CodeService<R, S> {
    pub fn new(repository: Arc<R>, sms_sender: Arc<S>, config: CodeServiceConfig) -> Self {
        Self {
            repository,
            sms_sender,
            config,
        }
    }

    /// Issue a fresh code for `(business, phone)` and deliver it by SMS
    ///
    /// The code is only sent once the store accepted it. A send inside the
    /// cooldown window fails with `CodeError::SendTooFrequent` and nothing is
    /// delivered. Formatting characters in `phone` are ignored, so every
    /// spelling of one number shares a single code and cooldown.
    pub async fn send(&self, business: &str, phone: &str) -> DomainResult<()> {
        let phone = normalize_phone_number(phone);
        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone.into());
        }
        let phone = phone.as_str();

        let masked = mask_phone_number(phone);
        let code = VerificationCode::generate_code();

        if let Err(e) = self.repository.store(business, phone, &code).await {
            match &e {
                DomainError::Code(CodeError::SendTooFrequent) => {
                    tracing::warn!(business = business, phone = %masked, event = "code_send_too_frequent", "Verification code requested within cooldown");
                }
                DomainError::StoreUnavailable { message } => {
                    tracing::error!(business = business, phone = %masked, error = %message, event = "code_store_failed", "Failed to persist verification code");
                }
                _ => {}
            }
            return Err(e);
        }

        let message_id = self
            .sms_sender
            .send(&self.config.template_id, &[code], phone)
            .await
            .map_err(|e| {
                tracing::error!(business = business, phone = %masked, error = ?e, event = "code_sms_failed", "Failed to deliver verification code");
                e
            })?;

        tracing::info!(
            business = business,
            phone = %masked,
            message_id = %message_id,
            event = "code_sent",
            "Verification code sent"
        );
        Ok(())
    }

    /// Check `input` against the live code for `(business, phone)`
    ///
    /// # Returns
    /// * `Ok(true)` - the code matched and has been consumed
    /// * `Ok(false)` - wrong code, one attempt consumed
    /// * `Err(CodeError::TooManyAttempts)` - attempts exhausted, even for the right code
    /// * `Err(CodeError::CodeNotFound)` - no live code for the pair
    /// * `Err(DomainError::StoreUnavailable)` - the store failed
    pub async fn verify(&self, business: &str, phone: &str, input: &str) -> DomainResult<bool> {
        let phone = normalize_phone_number(phone);
        let phone = phone.as_str();
        let masked = mask_phone_number(phone);

        match self.repository.verify(business, phone, input).await {
            Ok(CodeVerification::Matched) => {
                tracing::info!(business = business, phone = %masked, event = "code_verified", "Verification code accepted");
                Ok(true)
            }
            Ok(CodeVerification::Mismatched { remaining }) => {
                tracing::info!(business = business, phone = %masked, remaining = remaining, event = "code_mismatch", "Verification code rejected");
                Ok(false)
            }
            Err(DomainError::Code(CodeError::TooManyAttempts)) => {
                tracing::warn!(business = business, phone = %masked, event = "code_attempts_exhausted", "Verification attempts exhausted");
                Err(CodeError::TooManyAttempts.into())
            }
            Err(DomainError::StoreUnavailable { message }) => {
                tracing::error!(business = business, phone = %masked, error = %message, event = "code_verify_failed", "Code store failed during verification");
                Err(DomainError::StoreUnavailable { message })
            }
            Err(e) => Err(e),
        }
    }
}
