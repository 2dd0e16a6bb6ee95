//! Tests for the read-through user repository

use std::sync::Arc;

use crate::domain::entities::user::NewUser;
use crate::errors::DomainError;
use crate::repositories::user::{CachedUserRepository, MockUserCache, MockUserRepository, UserRepository};

fn setup() -> (
    Arc<MockUserRepository>,
    Arc<MockUserCache>,
    CachedUserRepository<MockUserRepository, MockUserCache>,
) {
    let repo = Arc::new(MockUserRepository::new());
    let cache = Arc::new(MockUserCache::new());
    let cached = CachedUserRepository::new(repo.clone(), cache.clone());
    (repo, cache, cached)
}

#[tokio::test]
async fn test_find_by_email_fills_cache_on_miss() {
    let (repo, cache, cached) = setup();
    let user = cached.create(NewUser::new("a@example.com", "h")).await.unwrap();
    assert!(cache.cached("a@example.com").await.is_none());

    let found = cached.find_by_email("a@example.com").await.unwrap().unwrap();
    assert_eq!(found, user);
    assert_eq!(cache.cached("a@example.com").await, Some(user.clone()));
    assert_eq!(repo.email_reads(), 1);

    // Served from the cache now
    cached.find_by_email("a@example.com").await.unwrap().unwrap();
    assert_eq!(repo.email_reads(), 1);
}

#[tokio::test]
async fn test_missing_user_is_not_cached() {
    let (_repo, cache, cached) = setup();
    assert!(cached.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(cache.cached("nobody@example.com").await.is_none());
}

#[tokio::test]
async fn test_update_writes_through() {
    let (_repo, cache, cached) = setup();
    let mut user = cached.create(NewUser::new("a@example.com", "h")).await.unwrap();
    cached.find_by_email("a@example.com").await.unwrap();

    user.apply_profile("alice".to_string(), "1990-01-01".to_string(), String::new());
    let updated = cached.update(user, Some("h2".to_string())).await.unwrap();

    let entry = cache.cached("a@example.com").await.unwrap();
    assert_eq!(entry, updated);
    assert_eq!(entry.nickname, "alice");
    assert_eq!(entry.password_hash, "h2");
}

#[tokio::test]
async fn test_update_aborts_when_invalidation_fails() {
    let (repo, cache, cached) = setup();
    let mut user = cached.create(NewUser::new("a@example.com", "h")).await.unwrap();

    cache.set_unavailable(true);
    user.apply_profile("alice".to_string(), String::new(), String::new());
    let err = cached.update(user.clone(), None).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.nickname.is_empty());
}

#[tokio::test]
async fn test_reads_fall_back_to_store_when_cache_fails() {
    let (repo, cache, cached) = setup();
    let user = cached.create(NewUser::new("a@example.com", "h")).await.unwrap();

    cache.set_unavailable(true);
    let found = cached.find_by_email("a@example.com").await.unwrap();
    assert_eq!(found, Some(user));
    assert_eq!(repo.email_reads(), 1);
}
