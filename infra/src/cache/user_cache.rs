//! Redis-backed user cache keyed by email

use async_trait::async_trait;

use pp_core::domain::entities::User;
use pp_core::errors::DomainError;
use pp_core::repositories::UserCache;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Stores users as JSON under `user:info:{email}`
pub struct RedisUserCache {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisUserCache {
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self { client, ttl_seconds }
    }

    fn key(&self, email: &str) -> String {
        self.client.key(&format!("user:info:{}", email))
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, email: &str) -> Result<Option<User>, DomainError> {
        let Some(raw) = self.client.get(&self.key(email)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // Unreadable entries are treated as a miss and dropped
                tracing::warn!(error = %e, event = "user_cache_corrupt_entry", "Discarding undecodable cached user");
                self.client.delete(&[self.key(email)]).await?;
                Ok(None)
            }
        }
    }

    async fn set(&self, user: &User) -> Result<(), DomainError> {
        let raw = serde_json::to_string(user).map_err(InfrastructureError::from)?;
        self.client
            .set_with_expiry(&self.key(&user.email), &raw, self.ttl_seconds)
            .await?;
        Ok(())
    }

    async fn invalidate(&self, email: &str) -> Result<(), DomainError> {
        self.client.delete(&[self.key(email)]).await?;
        Ok(())
    }
}
