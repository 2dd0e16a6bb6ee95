//! Mock SMS sender for testing the code service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::{CodeError, DomainResult};
use crate::services::code::SmsSender;

/// A delivered message: (template_id, params, phone)
pub type SentMessage = (String, Vec<String>, String);

pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<SentMessage>>,
    pub should_fail: AtomicBool,
}

impl RecordingSmsSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, params, _)| params.first().cloned())
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send(&self, template_id: &str, params: &[String], phone: &str) -> DomainResult<String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(CodeError::SmsDeliveryFailed.into());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((template_id.to_string(), params.to_vec(), phone.to_string()));
        Ok(format!("mock-msg-{}", sent.len()))
    }
}
