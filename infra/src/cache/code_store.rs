//! Redis-backed verification code store
//!
//! Each (business, phone) pair owns two keys: the hashed code and its
//! remaining-attempts counter (`...:cnt`). Both are written and consumed by
//! Lua scripts so concurrent senders and verifiers on any number of service
//! instances are linearized inside Redis.

use async_trait::async_trait;
use redis::Script;

use pp_core::domain::entities::VerificationCode;
use pp_core::errors::{CodeError, DomainError, DomainResult};
use pp_core::repositories::{CodeRepository, CodeStorePolicy, CodeVerification};
use pp_shared::phone::mask_phone_number;

use super::redis_client::RedisClient;

/// Store a code unless the pair is inside its resend cooldown
///
/// - KEYS[1]: code key
/// - KEYS[2]: attempts counter key
/// - ARGV[1]: hashed code
/// - ARGV[2]: expiry (seconds)
/// - ARGV[3]: resend cooldown (seconds)
/// - ARGV[4]: attempts allowed
///
/// Returns 0 when stored, -1 inside the cooldown, -2 when the code key
/// exists without an expiry.
///
/// An exhausted code (counter at 0) is not deleted by the verify script; it
/// stays until its TTL so every further verify keeps answering
/// `TooManyAttempts` instead of `CodeNotFound`. This script treats such a
/// pair as terminal and overwrites it at once, so a resend is never blocked
/// by the cooldown once the attempts are spent.
static SET_CODE_SCRIPT: &str = r#"
local key = KEYS[1]
local cnt_key = KEYS[2]
local expiry = tonumber(ARGV[2])
local cooldown = tonumber(ARGV[3])

local ttl = tonumber(redis.call('TTL', key))
if ttl == -1 then
    return -2
end

local cnt = tonumber(redis.call('GET', cnt_key) or '0')
if ttl == -2 or ttl <= expiry - cooldown or cnt <= 0 then
    redis.call('SET', key, ARGV[1], 'EX', expiry)
    redis.call('SET', cnt_key, ARGV[4], 'EX', expiry)
    return 0
end

return -1
"#;

/// Check a submitted code against the live one
///
/// - KEYS[1]: code key
/// - KEYS[2]: attempts counter key
/// - ARGV[1]: hashed input
///
/// Returns `{status, remaining}`: 0 matched (keys deleted), -1 attempts
/// exhausted, -2 mismatch (one attempt consumed), -3 no live code.
static VERIFY_CODE_SCRIPT: &str = r#"
local key = KEYS[1]
local cnt_key = KEYS[2]

local stored = redis.call('GET', key)
if not stored then
    return {-3, 0}
end

local cnt = tonumber(redis.call('GET', cnt_key) or '0')
if cnt <= 0 then
    return {-1, 0}
end

if stored == ARGV[1] then
    redis.call('DEL', key, cnt_key)
    return {0, cnt}
end

cnt = redis.call('DECR', cnt_key)
return {-2, cnt}
"#;

/// Code store backed by Redis
pub struct RedisCodeRepository {
    client: RedisClient,
    policy: CodeStorePolicy,
    set_script: Script,
    verify_script: Script,
}

impl RedisCodeRepository {
    pub fn new(client: RedisClient, policy: CodeStorePolicy) -> Self {
        Self {
            client,
            policy,
            set_script: Script::new(SET_CODE_SCRIPT),
            verify_script: Script::new(VERIFY_CODE_SCRIPT),
        }
    }

    fn keys(&self, business: &str, phone: &str) -> Vec<String> {
        let key = self.client.key(&VerificationCode::storage_key(business, phone));
        let cnt_key = format!("{}:cnt", key);
        vec![key, cnt_key]
    }
}

/// Map the set script status to a store outcome
pub(crate) fn interpret_set_result(status: i64) -> DomainResult<()> {
    match status {
        0 => Ok(()),
        -1 => Err(CodeError::SendTooFrequent.into()),
        -2 => Err(DomainError::store_unavailable(
            "verification code key exists without expiry",
        )),
        other => Err(DomainError::store_unavailable(format!(
            "unexpected set script status {}",
            other
        ))),
    }
}

/// Map the verify script `{status, remaining}` reply to a store outcome
pub(crate) fn interpret_verify_result(reply: &[i64]) -> DomainResult<CodeVerification> {
    match reply {
        [0, _] => Ok(CodeVerification::Matched),
        [-1, _] => Err(CodeError::TooManyAttempts.into()),
        [-2, remaining] => Ok(CodeVerification::Mismatched {
            remaining: u32::try_from(*remaining).unwrap_or(0),
        }),
        [-3, _] => Err(CodeError::CodeNotFound.into()),
        other => Err(DomainError::store_unavailable(format!(
            "unexpected verify script reply {:?}",
            other
        ))),
    }
}

#[async_trait]
impl CodeRepository for RedisCodeRepository {
    async fn store(&self, business: &str, phone: &str, code: &str) -> DomainResult<()> {
        let keys = self.keys(business, phone);
        let args = vec![
            VerificationCode::hash_code(code),
            self.policy.expiry.as_secs().to_string(),
            self.policy.resend_cooldown.as_secs().to_string(),
            self.policy.max_attempts.to_string(),
        ];

        let status: i64 = self
            .client
            .invoke_script(&self.set_script, &keys, &args)
            .await
            .map_err(|e| {
                tracing::error!(business = business, phone = %mask_phone_number(phone), error = %e, "Code set script failed");
                e
            })?;

        tracing::debug!(
            business = business,
            phone = %mask_phone_number(phone),
            status = status,
            "Code set script finished"
        );
        interpret_set_result(status)
    }

    async fn verify(&self, business: &str, phone: &str, input: &str) -> DomainResult<CodeVerification> {
        let keys = self.keys(business, phone);
        let args = vec![VerificationCode::hash_code(input)];

        let reply: Vec<i64> = self
            .client
            .invoke_script(&self.verify_script, &keys, &args)
            .await
            .map_err(|e| {
                tracing::error!(business = business, phone = %mask_phone_number(phone), error = %e, "Code verify script failed");
                e
            })?;
        interpret_verify_result(&reply)
    }
}
