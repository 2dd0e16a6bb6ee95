//! Shared utilities and common types for the Passport server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - The stable error response structure
//! - Utility functions (input validation, phone masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use crate::config::{
    AppConfig, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    SmsConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::{phone, validation};
