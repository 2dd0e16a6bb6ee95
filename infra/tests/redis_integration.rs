//! Integration tests for the Redis-backed stores
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p pp_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use pp_core::domain::entities::User;
use pp_core::errors::{CodeError, DomainError};
use pp_core::repositories::{CodeRepository, CodeStorePolicy, CodeVerification, UserCache};
use pp_core::{CodeService, CodeServiceConfig, SmsSender};
use pp_infra::cache::{CacheConfig, RedisClient, RedisCodeRepository, RedisUserCache};
use pp_infra::sms::{MockSmsService, SmsTemplates};
use pp_shared::SmsConfig;

/// Each test gets its own key prefix so runs never collide
async fn client() -> RedisClient {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let prefix = format!("passport-test-{}", rand::thread_rng().gen::<u32>());
    RedisClient::new(CacheConfig::new(url).with_prefix(prefix))
        .await
        .expect("Failed to connect to Redis")
}

fn policy(cooldown_secs: u64) -> CodeStorePolicy {
    CodeStorePolicy {
        expiry: Duration::from_secs(10),
        resend_cooldown: Duration::from_secs(cooldown_secs),
        max_attempts: 3,
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_health_check() {
    let client = client().await;
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete() {
    let client = client().await;
    let key = client.key("plain");

    client.set_with_expiry(&key, "value", 30).await.unwrap();
    assert_eq!(client.get(&key).await.unwrap(), Some("value".to_string()));
    assert!(client.ttl(&key).await.unwrap().is_some());

    assert!(client.delete(&[key.clone()]).await.unwrap());
    assert_eq!(client.get(&key).await.unwrap(), None);
    assert_eq!(client.ttl(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_resend_inside_cooldown_is_rejected() {
    let store = RedisCodeRepository::new(client().await, policy(1));

    store.store("login", "+15550104477", "111111").await.unwrap();
    let second = store.store("login", "+15550104477", "222222").await;
    assert!(matches!(second, Err(DomainError::Code(CodeError::SendTooFrequent))));

    // A different business context is an independent pair
    store.store("signup", "+15550104477", "333333").await.unwrap();

    tokio::time::sleep(Duration::from_millis(1600)).await;
    store.store("login", "+15550104477", "222222").await.unwrap();

    let old = store.verify("login", "+15550104477", "111111").await.unwrap();
    assert!(matches!(old, CodeVerification::Mismatched { .. }));
    let new = store.verify("login", "+15550104477", "222222").await.unwrap();
    assert_eq!(new, CodeVerification::Matched);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_code_is_single_use() {
    let store = RedisCodeRepository::new(client().await, policy(60));

    store.store("login", "+15550104477", "042517").await.unwrap();
    assert_eq!(
        store.verify("login", "+15550104477", "042517").await.unwrap(),
        CodeVerification::Matched
    );

    let again = store.verify("login", "+15550104477", "042517").await;
    assert!(matches!(again, Err(DomainError::Code(CodeError::CodeNotFound))));

    // Consumed codes release the cooldown
    store.store("login", "+15550104477", "777777").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_exhausted_code_rejects_correct_input() {
    let store = RedisCodeRepository::new(client().await, policy(60));

    store.store("login", "+15550104477", "042517").await.unwrap();
    for expected in [2, 1, 0] {
        let outcome = store.verify("login", "+15550104477", "000000").await.unwrap();
        assert_eq!(outcome, CodeVerification::Mismatched { remaining: expected });
    }

    let correct = store.verify("login", "+15550104477", "042517").await;
    assert!(matches!(correct, Err(DomainError::Code(CodeError::TooManyAttempts))));

    // The exhausted code is kept, so the answer does not turn into CodeNotFound
    let again = store.verify("login", "+15550104477", "000000").await;
    assert!(matches!(again, Err(DomainError::Code(CodeError::TooManyAttempts))));

    // Exhaustion is terminal, so a fresh code may be sent at once
    store.store("login", "+15550104477", "888888").await.unwrap();
    assert_eq!(
        store.verify("login", "+15550104477", "888888").await.unwrap(),
        CodeVerification::Matched
    );
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_concurrent_sends_store_exactly_one_code() {
    let store = Arc::new(RedisCodeRepository::new(client().await, policy(60)));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.store("login", "+15550104477", &format!("{:06}", i)).await })
        })
        .collect();

    let mut stored = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => stored += 1,
            Err(DomainError::Code(CodeError::SendTooFrequent)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(stored, 1);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_code_service_end_to_end() {
    let store = Arc::new(RedisCodeRepository::new(client().await, policy(60)));
    let sms = Arc::new(MockSmsService::new(SmsTemplates::new(SmsConfig::default().templates)));
    let service = CodeService::new(store, sms.clone() as Arc<dyn SmsSender>, CodeServiceConfig::default());

    service.send("login", "+15550104477").await.unwrap();

    let messages = sms.messages();
    assert_eq!(messages.len(), 1);
    let code: String = messages[0].body.chars().filter(|c| c.is_ascii_digit()).take(6).collect();
    assert_eq!(code.len(), 6);

    assert!(service.verify("login", "+15550104477", &code).await.unwrap());
    assert!(service.verify("login", "+15550104477", &code).await.is_err());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_user_cache_round_trip() {
    let cache = RedisUserCache::new(client().await, 60);
    let now = Utc::now();
    let user = User {
        id: 7,
        email: "ada@example.com".to_string(),
        password_hash: "$2b$04$hash".to_string(),
        nickname: "ada".to_string(),
        birthday: "1815-12-10".to_string(),
        info: "engine".to_string(),
        created_at: now,
        updated_at: now,
    };

    assert!(cache.get(&user.email).await.unwrap().is_none());
    cache.set(&user).await.unwrap();

    let cached = cache.get(&user.email).await.unwrap().unwrap();
    assert_eq!(cached.id, 7);
    assert_eq!(cached.nickname, "ada");

    cache.invalidate(&user.email).await.unwrap();
    assert!(cache.get(&user.email).await.unwrap().is_none());
}
