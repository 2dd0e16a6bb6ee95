//! Error kinds grouped by area
//!
//! Every kind maps to a stable error code from [`pp_shared::error_codes`]; the
//! mapping lives next to the enum so new variants cannot be added without one.

use pp_shared::error_codes;
use pp_shared::validation::FieldError;
use pp_shared::{ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Credential and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("User not found")]
    UserNotFound,
}

/// Verification code errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Verification code requested too frequently, please retry later")]
    SendTooFrequent,

    #[error("Too many failed attempts, please request a new code")]
    TooManyAttempts,

    #[error("No verification code was issued or it has expired")]
    CodeNotFound,

    #[error("Failed to deliver verification code")]
    SmsDeliveryFailed,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session expired, please log in again")]
    Expired,

    #[error("Session token is invalid")]
    Tampered,

    #[error("Session does not belong to this client")]
    FingerprintMismatch,

    #[error("Failed to issue session")]
    IssueFailed,
}

/// Input format errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password for {field} must be 8-72 letters and digits mixing upper case, lower case and digits")]
    WeakPassword { field: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Field {field} is too long")]
    FieldTooLong { field: String },

    #[error("Field {field} must be a date formatted as YYYY-MM-DD")]
    InvalidDate { field: String },

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Invalid format for field {field}")]
    InvalidFormat { field: String },
}

impl ValidationError {
    /// Name of the offending input field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidEmail => "email",
            ValidationError::PasswordMismatch => "confirm_password",
            ValidationError::InvalidPhone => "phone",
            ValidationError::WeakPassword { field }
            | ValidationError::FieldTooLong { field }
            | ValidationError::InvalidDate { field }
            | ValidationError::InvalidFormat { field } => field,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => error_codes::INVALID_EMAIL,
            ValidationError::WeakPassword { .. } => error_codes::INVALID_PASSWORD,
            ValidationError::PasswordMismatch => error_codes::PASSWORD_MISMATCH,
            ValidationError::FieldTooLong { .. } => error_codes::FIELD_TOO_LONG,
            ValidationError::InvalidDate { .. } => error_codes::INVALID_DATE,
            ValidationError::InvalidPhone => error_codes::INVALID_PHONE,
            ValidationError::InvalidFormat { .. } => error_codes::VALIDATION_ERROR,
        }
    }
}

impl From<FieldError> for ValidationError {
    fn from(err: FieldError) -> Self {
        match err.code.as_str() {
            error_codes::INVALID_EMAIL => ValidationError::InvalidEmail,
            error_codes::INVALID_PASSWORD => ValidationError::WeakPassword { field: err.field },
            error_codes::PASSWORD_MISMATCH => ValidationError::PasswordMismatch,
            error_codes::FIELD_TOO_LONG => ValidationError::FieldTooLong { field: err.field },
            error_codes::INVALID_DATE => ValidationError::InvalidDate { field: err.field },
            error_codes::INVALID_PHONE => ValidationError::InvalidPhone,
            _ => ValidationError::InvalidFormat { field: err.field },
        }
    }
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::EmailAlreadyRegistered => error_codes::EMAIL_ALREADY_REGISTERED,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
        }
    }
}

impl CodeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CodeError::SendTooFrequent => error_codes::CODE_SEND_TOO_FREQUENT,
            CodeError::TooManyAttempts => error_codes::CODE_TOO_MANY_ATTEMPTS,
            CodeError::CodeNotFound => error_codes::CODE_NOT_FOUND,
            CodeError::SmsDeliveryFailed => error_codes::SMS_ERROR,
        }
    }
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Expired => error_codes::SESSION_EXPIRED,
            SessionError::Tampered => error_codes::SESSION_TAMPERED,
            SessionError::FingerprintMismatch => error_codes::SESSION_FINGERPRINT_MISMATCH,
            SessionError::IssueFailed => error_codes::SESSION_ISSUE_FAILED,
        }
    }
}

impl IntoErrorResponse for AuthError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.to_string())
    }
}

impl IntoErrorResponse for CodeError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.to_string())
    }
}

impl IntoErrorResponse for SessionError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.to_string())
    }
}

impl IntoErrorResponse for ValidationError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.to_string()).add_detail("field", self.field())
    }
}
