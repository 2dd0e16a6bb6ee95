//! Unit tests for session claims

use crate::domain::entities::session::{SessionClaims, DEFAULT_SESSION_EXPIRY_SECONDS, SESSION_ISSUER};

#[test]
fn test_claims_expiry_window() {
    let claims = SessionClaims::new(9, "Mozilla/5.0", 1_000, DEFAULT_SESSION_EXPIRY_SECONDS, SESSION_ISSUER);

    assert_eq!(claims.exp, 1_900);
    assert!(!claims.is_expired_at(1_000 + 899));
    assert!(!claims.is_expired_at(1_900));
    assert!(claims.is_expired_at(1_901));
}
