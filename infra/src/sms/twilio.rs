//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio REST API with reqwest.
//!
//! ## Features
//!
//! - E.164 normalization with the `phonenumber` crate
//! - Retry with exponential backoff on rate limiting and server errors
//! - Phone number masking in logs

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use pp_core::errors::DomainResult;
use pp_core::SmsSender;
use pp_shared::phone::{mask_phone_number, normalize_phone_number};
use pp_shared::SmsConfig;

use super::template::SmsTemplates;
use crate::InfrastructureError;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Twilio rejects bodies longer than this
const MAX_BODY_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// REST endpoint root
    pub api_base: String,
}

impl TwilioConfig {
    /// Build from the generic SMS config (`api_key` is the account SID)
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio requires sms.api_key and sms.api_secret".to_string(),
            ));
        }

        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "sms.from_number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.api_key.clone(),
            auth_token: config.api_secret.clone(),
            from_number: config.from_number.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
            api_base: TWILIO_API_BASE.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Outcome of one delivery attempt
enum Attempt {
    Sent(String),
    Retry(String),
    Fatal(String),
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    http: reqwest::Client,
    config: TwilioConfig,
    templates: SmsTemplates,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig, templates: SmsTemplates) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { http, config, templates })
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            match self.attempt(to, body).await {
                Attempt::Sent(sid) => {
                    info!("SMS sent successfully to {} with SID: {}", mask_phone_number(to), sid);
                    return Ok(sid);
                }
                Attempt::Fatal(reason) => {
                    error!("Twilio rejected SMS to {}: {}", mask_phone_number(to), reason);
                    return Err(InfrastructureError::Sms(reason));
                }
                Attempt::Retry(reason) => {
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            attempts, reason
                        )));
                    }
                    warn!(
                        "Failed to send SMS (attempt {}/{}): {}, retrying after {:?}",
                        attempts, self.config.max_retries, reason, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn attempt(&self, to: &str, body: &str) -> Attempt {
        let response = self
            .http
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("To", to), ("From", self.config.from_number.as_str()), ("Body", body)])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => return Attempt::Retry(e.to_string()),
            Err(e) => return Attempt::Fatal(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<MessageResponse>().await {
                Ok(message) => Attempt::Sent(message.sid),
                Err(e) => Attempt::Fatal(format!("Unreadable Twilio response: {}", e)),
            };
        }

        let detail = response.text().await.unwrap_or_default();
        classify_status(status, detail)
    }
}

fn classify_status(status: StatusCode, detail: String) -> Attempt {
    let reason = format!("HTTP {}: {}", status.as_u16(), detail);
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Attempt::Retry(reason)
    } else {
        Attempt::Fatal(reason)
    }
}

/// Normalize a phone number to E.164
///
/// Numbers without a country code are read as mainland China mobiles when
/// they match that pattern and as US numbers otherwise.
pub fn to_e164(phone: &str) -> Result<String, InfrastructureError> {
    let normalized = normalize_phone_number(phone);
    let candidate = if normalized.starts_with('+') {
        normalized
    } else if normalized.len() == 11 && normalized.starts_with('1') {
        format!("+86{}", normalized)
    } else {
        format!("+1{}", normalized)
    };

    let parsed = candidate.parse::<PhoneNumber>().map_err(|e| {
        InfrastructureError::Sms(format!("Invalid phone number format: {}", e))
    })?;

    if !phonenumber::is_valid(&parsed) {
        return Err(InfrastructureError::Sms(format!(
            "Invalid phone number: {}",
            mask_phone_number(&candidate)
        )));
    }

    Ok(parsed.format().mode(Mode::E164).to_string())
}

#[async_trait]
impl SmsSender for TwilioSmsService {
    async fn send(&self, template_id: &str, params: &[String], phone: &str) -> DomainResult<String> {
        let to = to_e164(phone)?;
        let body = self.templates.render(template_id, params)?;

        if body.len() > MAX_BODY_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_BODY_LENGTH
            ))
            .into());
        }

        info!(
            "Sending SMS to {} via Twilio (template: {}, length: {} chars)",
            mask_phone_number(&to),
            template_id,
            body.len()
        );

        Ok(self.send_with_retry(&to, &body).await?)
    }
}
