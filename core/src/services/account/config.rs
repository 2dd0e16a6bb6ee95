//! Configuration for the account service

/// Account service settings
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
