//! SMS provider configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    pub provider: String,

    /// Provider account identifier (Twilio account SID)
    #[serde(default)]
    pub api_key: String,

    /// Provider secret (Twilio auth token)
    #[serde(default)]
    pub api_secret: String,

    /// Sender phone number in E.164 format
    #[serde(default)]
    pub from_number: String,

    /// Message bodies by template id; `{0}`, `{1}` ... are replaced by
    /// the positional parameters
    #[serde(default = "default_templates")]
    pub templates: HashMap<String, String>,

    /// Maximum delivery attempts per message
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            api_secret: String::new(),
            from_number: String::from("+1234567890"),
            templates: default_templates(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_templates() -> HashMap<String, String> {
    HashMap::from([(
        String::from("100000000"),
        String::from("Your Passport verification code is {0}. It expires in 10 minutes."),
    )])
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    30
}
