//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, CodeError, SessionError, ValidationError};

use pp_shared::validation::FieldError;
use pp_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// A backing store or cache failed. `message` carries the backend detail
    /// for logs and is never rendered to callers.
    #[error("Service temporarily unavailable, please retry later")]
    StoreUnavailable { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Build a `StoreUnavailable` error from a backend failure
    pub fn store_unavailable(detail: impl std::fmt::Display) -> Self {
        DomainError::StoreUnavailable {
            message: detail.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            DomainError::Auth(err) => err.error_code(),
            DomainError::Code(err) => err.error_code(),
            DomainError::Session(err) => err.error_code(),
            DomainError::ValidationErr(err) => err.error_code(),
        }
    }
}

impl From<FieldError> for DomainError {
    fn from(err: FieldError) -> Self {
        DomainError::ValidationErr(err.into())
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Auth(err) => err.to_error_response(),
            DomainError::Code(err) => err.to_error_response(),
            DomainError::Session(err) => err.to_error_response(),
            DomainError::ValidationErr(err) => err.to_error_response(),
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
            other => ErrorResponse::new(other.error_code(), other.to_string()),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        err.to_error_response()
    }
}
