//! Unit tests for account service

use std::sync::Arc;

use pp_shared::JwtConfig;

use crate::domain::value_objects::ProfileUpdate;
use crate::errors::{AuthError, DomainError, SessionError, ValidationError};
use crate::repositories::{CachedUserRepository, MockUserCache, MockUserRepository, UserRepository};
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::session::SessionService;

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "Passw0rdOk";
const AGENT: &str = "Mozilla/5.0";

type Users = CachedUserRepository<MockUserRepository, MockUserCache>;

fn setup() -> (Arc<Users>, Arc<MockUserCache>, AccountService<Users>) {
    let cache = Arc::new(MockUserCache::new());
    let users = Arc::new(CachedUserRepository::new(Arc::new(MockUserRepository::new()), cache.clone()));
    let sessions = Arc::new(SessionService::new(&JwtConfig::new("account-test-secret")));
    let service = AccountService::new(users.clone(), sessions, AccountServiceConfig { bcrypt_cost: 4 });
    (users, cache, service)
}

#[tokio::test]
async fn test_signup_stores_hashed_password() {
    let (users, _cache, service) = setup();

    let user = service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();
    assert_eq!(user.email, EMAIL);
    assert_ne!(user.password_hash, PASSWORD);
    assert!(user.password_hash.starts_with("$2"));

    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.email, EMAIL);
}

#[tokio::test]
async fn test_signup_validation() {
    let (_users, _cache, service) = setup();

    let err = service.signup("not-an-email", PASSWORD, PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidEmail)));

    let err = service.signup(EMAIL, "password", "password").await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::WeakPassword { .. })));

    let err = service.signup(EMAIL, PASSWORD, "Passw0rdOK").await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::PasswordMismatch)));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (_users, _cache, service) = setup();
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let err = service.signup(EMAIL, "An0therPass", "An0therPass").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
}

#[tokio::test]
async fn test_login_issues_bound_session() {
    let (_users, _cache, service) = setup();
    let created = service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let (user, token) = service.login(EMAIL, PASSWORD, AGENT).await.unwrap();
    assert_eq!(user.id, created.id);

    let profile = service.profile(&token, AGENT).await.unwrap();
    assert_eq!(profile.id, created.id);

    let err = service.profile(&token, "curl/8.4.0").await.unwrap_err();
    assert!(matches!(err, DomainError::Session(SessionError::FingerprintMismatch)));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (_users, _cache, service) = setup();
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let wrong_password = service.login(EMAIL, "Wr0ngPassword", AGENT).await.unwrap_err();
    let unknown_email = service.login("bob@example.com", PASSWORD, AGENT).await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_profile_with_garbage_token() {
    let (_users, _cache, service) = setup();

    let err = service.profile("garbage", AGENT).await.unwrap_err();
    assert!(matches!(err, DomainError::Session(SessionError::Tampered)));
}

#[tokio::test]
async fn test_edit_profile_and_password() {
    let (_users, cache, service) = setup();
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let profile = ProfileUpdate::new("alice", "1990-05-17", "hello there");
    let updated = service.edit(EMAIL, PASSWORD, Some("N3wPassword"), profile).await.unwrap();
    assert_eq!(updated.nickname, "alice");
    assert_eq!(updated.birthday, "1990-05-17");
    assert_eq!(updated.info, "hello there");

    // Cache holds the fresh record
    assert_eq!(cache.cached(EMAIL).await.unwrap().nickname, "alice");

    let err = service.login(EMAIL, PASSWORD, AGENT).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    service.login(EMAIL, "N3wPassword", AGENT).await.unwrap();
}

#[tokio::test]
async fn test_edit_without_new_password_keeps_old_one() {
    let (_users, _cache, service) = setup();
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    service
        .edit(EMAIL, PASSWORD, None, ProfileUpdate::new("al", "", ""))
        .await
        .unwrap();
    service.login(EMAIL, PASSWORD, AGENT).await.unwrap();
}

#[tokio::test]
async fn test_edit_requires_current_password() {
    let (users, _cache, service) = setup();
    let user = service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let err = service
        .edit(EMAIL, "Wr0ngPassword", None, ProfileUpdate::new("mallory", "", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(users.find_by_id(user.id).await.unwrap().unwrap().nickname.is_empty());
}

#[tokio::test]
async fn test_edit_field_limits() {
    let (_users, _cache, service) = setup();
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();

    let err = service
        .edit(EMAIL, PASSWORD, None, ProfileUpdate::new("x".repeat(16), "", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::FieldTooLong { ref field }) if field == "nickname"));

    let err = service
        .edit(EMAIL, PASSWORD, None, ProfileUpdate::new("", "", "y".repeat(51)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::FieldTooLong { ref field }) if field == "info"));

    let err = service
        .edit(EMAIL, PASSWORD, None, ProfileUpdate::new("", "17/05/1990", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidDate { .. })));

    let err = service
        .edit(EMAIL, PASSWORD, Some("weak"), ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::WeakPassword { ref field }) if field == "new_password"));
}

#[tokio::test]
async fn test_unknown_email_still_runs_password_check() {
    let (_users, _cache, service) = setup();
    assert!(!service.dummy_hash_initialized());

    let err = service.authenticate("nobody@example.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(service.dummy_hash_initialized());

    // Known accounts never match the placeholder hash
    service.signup(EMAIL, PASSWORD, PASSWORD).await.unwrap();
    let err = service.authenticate(EMAIL, "unknown-account-placeholder").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}
