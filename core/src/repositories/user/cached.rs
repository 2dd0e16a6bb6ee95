//! Read-through user repository backed by a [`UserCache`]

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::{UserCache, UserRepository};

/// Wraps a repository with an email-keyed cache
///
/// Reads by email hit the cache first and repopulate it on a miss. Updates
/// invalidate the entry before writing and write the fresh record through
/// afterwards, so a reader never sees a cached record older than the store.
pub struct CachedUserRepository<R: UserRepository, C: UserCache> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R: UserRepository, C: UserCache> CachedUserRepository<R, C> {
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl<R: UserRepository, C: UserCache> UserRepository for CachedUserRepository<R, C> {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.repository.create(user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        match self.cache.get(email).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = ?e, event = "user_cache_read_failed", "User cache read failed, falling back to store");
            }
        }

        let user = self.repository.find_by_email(email).await?;
        if let Some(user) = &user {
            if let Err(e) = self.cache.set(user).await {
                tracing::warn!(error = ?e, user_id = user.id, event = "user_cache_fill_failed", "Failed to populate user cache");
            }
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }

    async fn update(&self, user: User, new_password_hash: Option<String>) -> Result<User, DomainError> {
        // A stale entry must not survive the write, so a failed invalidation aborts
        self.cache.invalidate(&user.email).await?;

        let updated = self.repository.update(user, new_password_hash).await?;

        if let Err(e) = self.cache.set(&updated).await {
            tracing::warn!(error = ?e, user_id = updated.id, event = "user_cache_write_through_failed", "Failed to write updated user to cache");
        }
        Ok(updated)
    }
}
