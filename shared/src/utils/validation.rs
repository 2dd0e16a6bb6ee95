//! Input format validation for account requests
//!
//! These checks run before any store access; they only look at the shape of
//! the input.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::error_codes;

/// Longest nickname accepted, in characters
pub const NICKNAME_MAX_CHARS: usize = 15;

/// Longest self-introduction accepted, in characters
pub const INFO_MAX_CHARS: usize = 50;

/// Password length bounds; the upper bound is the bcrypt input limit
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 72;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("valid email pattern")
});

/// Validation failure for a single input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check an email address against the accepted pattern
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(FieldError::new("email", "Invalid email format", error_codes::INVALID_EMAIL))
    }
}

/// Check password strength: 8 to 72 ASCII letters or digits, with at least
/// one lowercase letter, one uppercase letter and one digit
pub fn validate_password(field: &str, password: &str) -> Result<(), FieldError> {
    let len_ok = (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.len());
    let charset_ok = password.chars().all(|c| c.is_ascii_alphanumeric());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if len_ok && charset_ok && has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            "Password must be 8-72 letters and digits, mixing upper case, lower case and digits",
            error_codes::INVALID_PASSWORD,
        ))
    }
}

/// Check that the confirmation matches the password
pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), FieldError> {
    if password == confirm {
        Ok(())
    } else {
        Err(FieldError::new(
            "confirm_password",
            "Passwords do not match",
            error_codes::PASSWORD_MISMATCH,
        ))
    }
}

pub fn validate_nickname(nickname: &str) -> Result<(), FieldError> {
    validate_max_chars("nickname", nickname, NICKNAME_MAX_CHARS)
}

pub fn validate_info(info: &str) -> Result<(), FieldError> {
    validate_max_chars("info", info, INFO_MAX_CHARS)
}

/// Birthday is optional; when present it must be a calendar date `YYYY-MM-DD`
pub fn validate_birthday(birthday: &str) -> Result<(), FieldError> {
    if birthday.is_empty() || NaiveDate::parse_from_str(birthday, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(FieldError::new(
            "birthday",
            "Birthday must be formatted as YYYY-MM-DD",
            error_codes::INVALID_DATE,
        ))
    }
}

fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), FieldError> {
    if value.chars().count() <= max {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            format!("Must be at most {} characters", max),
            error_codes::FIELD_TOO_LONG,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@mail-host.co.uk").is_ok());
        assert!(validate_email("alice@example").is_err());
        assert!(validate_email("alice.example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password", "Passw0rdOk").is_ok());
        assert!(validate_password("password", "password123").is_err()); // no upper case
        assert!(validate_password("password", "PASSWORD123").is_err()); // no lower case
        assert!(validate_password("password", "Password").is_err()); // no digit
        assert!(validate_password("password", "Pass12").is_err()); // too short
        assert!(validate_password("password", "Passw0rd!").is_err()); // symbol
        assert!(validate_password("password", &format!("Aa1{}", "x".repeat(70))).is_err());
    }

    #[test]
    fn test_password_error_names_field() {
        let err = validate_password("new_password", "weak").unwrap_err();
        assert_eq!(err.field, "new_password");
        assert_eq!(err.code, error_codes::INVALID_PASSWORD);
    }

    #[test]
    fn test_validate_password_confirmation() {
        assert!(validate_password_confirmation("Passw0rdOk", "Passw0rdOk").is_ok());
        let err = validate_password_confirmation("Passw0rdOk", "Passw0rdOK").unwrap_err();
        assert_eq!(err.code, error_codes::PASSWORD_MISMATCH);
    }

    #[test]
    fn test_profile_field_lengths() {
        assert!(validate_nickname("fifteen chars!!").is_ok());
        assert!(validate_nickname("sixteen chars!!!").is_err());
        assert!(validate_nickname("十五个字符十五个字符十五个字符").is_ok());
        assert!(validate_info(&"i".repeat(50)).is_ok());
        assert!(validate_info(&"i".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_birthday() {
        assert!(validate_birthday("").is_ok());
        assert!(validate_birthday("1990-02-28").is_ok());
        assert!(validate_birthday("1990-02-30").is_err());
        assert!(validate_birthday("28/02/1990").is_err());
    }
}
