//! Password hashing

use bcrypt::{hash, verify};

use crate::errors::DomainError;

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Check a password against a bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    verify(password, password_hash).map_err(|e| DomainError::Internal {
        message: format!("Password verification failed: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "Passw0rdOk";
        let hashed = hash_password(password, 4).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("Passw0rdNo", &hashed).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("Passw0rdOk", "not-a-bcrypt-hash"),
            Err(DomainError::Internal { .. })
        ));
    }
}
