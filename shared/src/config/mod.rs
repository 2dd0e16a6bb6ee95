//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token signing
//! - `cache` - Redis connection and user cache TTL
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging
//! - `sms` - SMS provider credentials and templates
//! - `verification` - Verification code lifecycle

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use sms::SmsConfig;
pub use verification::VerificationConfig;

/// Prefix of environment variables overriding configuration values,
/// e.g. `PASSPORT__JWT__SECRET` or `PASSPORT__CACHE__URL`
pub const ENV_PREFIX: &str = "PASSPORT";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Session signing configuration
    pub jwt: JwtConfig,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// SMS provider configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(env: Environment) -> Self {
        let database = match env {
            Environment::Production => {
                DatabaseConfig::new("mysql://prod-db:3306/passport").with_max_connections(50)
            }
            _ => DatabaseConfig::default(),
        };

        Self {
            environment: env,
            database,
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Layers, lowest precedence first:
    /// 1. built-in defaults for the environment
    /// 2. `config/{environment}.toml`, if present
    /// 3. `PASSPORT__*` environment variables (`__` separates nesting levels)
    pub fn load() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        dotenvy::from_filename(env.env_file()).ok();
        dotenvy::dotenv().ok();
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory and environment
    pub fn load_from(dir: &str, env: Environment) -> Result<Self, ConfigError> {
        let defaults = ::config::Config::try_from(&Self::for_environment(env))?;

        let loaded: AppConfig = ::config::Config::builder()
            .add_source(defaults)
            .add_source(
                ::config::File::with_name(&format!("{}/{}", dir, env.config_file()))
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings that would break the verification or session policy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "jwt.secret must be set in production".to_string(),
            ));
        }
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.session_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "jwt.session_expiry must be positive".to_string(),
            ));
        }
        if self.verification.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "verification.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.verification.resend_cooldown_seconds >= self.verification.code_expiry_seconds {
            return Err(ConfigError::Invalid(
                "verification.resend_cooldown_seconds must be shorter than code_expiry_seconds"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
