//! Domain entities representing core business objects.

pub mod session;
pub mod user;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use session::{SessionClaims, DEFAULT_SESSION_EXPIRY_SECONDS, SESSION_ISSUER};
pub use user::{NewUser, User};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, DEFAULT_RESEND_COOLDOWN_SECONDS,
    MAX_ATTEMPTS,
};
