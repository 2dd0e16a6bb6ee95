//! Mock SMS Service Implementation
//!
//! Renders and records messages instead of sending them. Used in
//! development and as the fallback provider.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use pp_core::errors::DomainResult;
use pp_core::SmsSender;
use pp_shared::phone::mask_phone_number;

use super::template::SmsTemplates;
use crate::InfrastructureError;

/// A rendered message kept by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMessage {
    pub message_id: String,
    pub phone: String,
    pub template_id: String,
    pub body: String,
}

/// Mock SMS service for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    templates: SmsTemplates,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    messages: Arc<Mutex<Vec<MockMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    pub fn new(templates: SmsTemplates) -> Self {
        Self {
            templates,
            message_count: Arc::new(AtomicU64::new(0)),
            messages: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Messages delivered so far, oldest first
    pub fn messages(&self) -> Vec<MockMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn deliver(
        &self,
        template_id: &str,
        params: &[String],
        phone: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock SMS service simulating failure for phone: {}", masked_phone);
            return Err(InfrastructureError::Sms("Simulated SMS sending failure".to_string()));
        }

        let body = self.templates.render(template_id, params)?;
        let message_id = format!("mock-msg-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            template_id = %template_id,
            message_length = body.len(),
            "SMS sent successfully (mock)"
        );

        if let Ok(mut messages) = self.messages.lock() {
            messages.push(MockMessage {
                message_id: message_id.clone(),
                phone: phone.to_string(),
                template_id: template_id.to_string(),
                body,
            });
        }

        Ok(message_id)
    }
}

#[async_trait]
impl SmsSender for MockSmsService {
    async fn send(&self, template_id: &str, params: &[String], phone: &str) -> DomainResult<String> {
        Ok(self.deliver(template_id, params, phone)?)
    }
}
