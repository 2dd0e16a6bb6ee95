//! Unit tests for verification code entity

use std::collections::HashSet;

use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH, MAX_ATTEMPTS};

#[test]
fn test_issue_verification_code() {
    let code = VerificationCode::issue("login", "+15551234567", "042517", MAX_ATTEMPTS);

    assert_eq!(code.business, "login");
    assert_eq!(code.phone, "+15551234567");
    assert_eq!(code.code_hash, VerificationCode::hash_code("042517"));
    assert_eq!(code.attempts_remaining, MAX_ATTEMPTS);
    assert!(!code.is_exhausted());
    assert!(code.matches("042517"));
    assert!(!code.matches("042518"));
}

#[test]
fn test_record_failure_until_exhausted() {
    let mut code = VerificationCode::issue("login", "+15551234567", "042517", 2);

    assert_eq!(code.record_failure(), 1);
    assert_eq!(code.record_failure(), 0);
    assert!(code.is_exhausted());
    assert_eq!(code.record_failure(), 0);
}

#[test]
fn test_generate_code_format() {
    for _ in 0..200 {
        let code = VerificationCode::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().expect("Generated code should be a valid number");
        assert!(num < 1_000_000);
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: HashSet<String> = (0..100).map(|_| VerificationCode::generate_code()).collect();
    assert!(codes.len() > 90, "codes should be mostly unique");
}

#[test]
fn test_hash_code_is_stable_and_hides_code() {
    let first = VerificationCode::hash_code("012345");
    let second = VerificationCode::hash_code("012345");

    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(!first.contains("012345"));
    assert_ne!(first, VerificationCode::hash_code("012346"));
}

#[test]
fn test_storage_key() {
    assert_eq!(
        VerificationCode::storage_key("login", "+15551234567"),
        "phone_code:login:+15551234567"
    );
}
