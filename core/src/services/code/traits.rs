//! SMS delivery seam

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Trait for SMS providers
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Render `template_id` with `params` and deliver it to `phone`
    ///
    /// Returns the provider's message id. Delivery failures are reported as
    /// `CodeError::SmsDeliveryFailed`.
    async fn send(&self, template_id: &str, params: &[String], phone: &str) -> DomainResult<String>;
}
