//! Configuration for the code service

use pp_shared::VerificationConfig;

/// Default SMS template for verification codes
pub const DEFAULT_TEMPLATE_ID: &str = "100000000";

#[derive(Debug, Clone)]
pub struct CodeServiceConfig {
    /// Template id handed to the SMS sender with params `[code]`
    pub template_id: String,
}

impl Default for CodeServiceConfig {
    fn default() -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
        }
    }
}

impl From<&VerificationConfig> for CodeServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            template_id: config.template_id.clone(),
        }
    }
}
