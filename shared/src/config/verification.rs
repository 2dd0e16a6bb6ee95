//! Verification code policy

use serde::{Deserialize, Serialize};

/// Verification code lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds before an issued code expires
    #[serde(default = "default_code_expiry")]
    pub code_expiry_seconds: u64,

    /// Minimum seconds between two sends for the same (business, phone)
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u64,

    /// Wrong guesses allowed per issued code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// SMS template used to deliver codes
    #[serde(default = "default_template_id")]
    pub template_id: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_seconds: default_code_expiry(),
            resend_cooldown_seconds: default_resend_cooldown(),
            max_attempts: default_max_attempts(),
            template_id: default_template_id(),
        }
    }
}

fn default_code_expiry() -> u64 {
    600
}

fn default_resend_cooldown() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_template_id() -> String {
    String::from("100000000")
}
