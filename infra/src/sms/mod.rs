//! SMS Service Module
//!
//! `SmsSender` implementations used by the code service.
//!
//! ## Features
//!
//! - **Templates**: message bodies rendered from configured template ids
//! - **Mock Implementation**: logs and records messages for development
//! - **Twilio Support**: production SMS via the Twilio REST API
//! - **Security**: phone numbers are masked in logs

use std::sync::Arc;

use pp_core::SmsSender;
use pp_shared::SmsConfig;

pub mod mock_sms;
pub mod template;
pub mod twilio;

pub use mock_sms::MockSmsService;
pub use template::SmsTemplates;
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS sender based on configuration
///
/// Unknown providers fall back to the mock sender. A misconfigured Twilio
/// provider is an error, so production never silently drops messages.
pub fn create_sms_sender(config: &SmsConfig) -> Result<Arc<dyn SmsSender>, InfrastructureError> {
    let templates = SmsTemplates::new(config.templates.clone());

    match config.provider.as_str() {
        "mock" => Ok(Arc::new(MockSmsService::new(templates))),
        "twilio" => {
            let twilio_config = TwilioConfig::from_sms_config(config)?;
            Ok(Arc::new(TwilioSmsService::new(twilio_config, templates)?))
        }
        other => {
            tracing::warn!("Unknown SMS provider '{}', using mock implementation", other);
            Ok(Arc::new(MockSmsService::new(templates)))
        }
    }
}
