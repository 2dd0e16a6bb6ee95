//! Account service: signup, login, profile edit and profile read
//!
//! Thin orchestration over a [`UserRepository`] and the [`SessionService`];
//! independent of the verification code path.
//!
//! [`UserRepository`]: crate::repositories::UserRepository
//! [`SessionService`]: crate::services::session::SessionService

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AccountService;
