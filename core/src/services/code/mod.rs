//! Verification code service
//!
//! Generates codes, persists them through a [`CodeRepository`] and delivers
//! them with an [`SmsSender`]. Verification is delegated to the store, which
//! owns the attempt counter.
//!
//! [`CodeRepository`]: crate::repositories::CodeRepository

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::CodeServiceConfig;
pub use service::CodeService;
pub use traits::SmsSender;
