//! # Passport Core
//!
//! Core business logic and domain layer for the Passport account service.
//! This crate contains domain entities, business services, repository
//! interfaces with in-memory implementations, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{NewUser, ProfileUpdate, SessionClaims, User, VerificationCode};
pub use errors::{AuthError, CodeError, DomainError, DomainResult, SessionError, ValidationError};
pub use repositories::{
    CachedUserRepository, CodeRepository, CodeStorePolicy, CodeVerification, MockCodeRepository,
    MockUserCache, MockUserRepository, UserCache, UserRepository,
};
pub use services::{
    AccountService, AccountServiceConfig, CodeService, CodeServiceConfig, SessionService, SmsSender,
};
