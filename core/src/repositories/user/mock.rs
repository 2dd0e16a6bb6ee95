//! In-memory user repository and cache for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::{UserCache, UserRepository};

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `find_by_email` calls that reached the repository
    pub fn email_reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        // Uniqueness is checked under the write lock, the same guarantee a
        // unique index gives
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = user.into_user(id, Utc::now());
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, mut user: User, new_password_hash: Option<String>) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let Some(stored) = users.get(&user.id) else {
            return Err(AuthError::UserNotFound.into());
        };

        user.email = stored.email.clone();
        user.created_at = stored.created_at;
        user.password_hash = new_password_hash.unwrap_or_else(|| stored.password_hash.clone());
        user.updated_at = Utc::now();

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Mock user cache for testing
pub struct MockUserCache {
    entries: Arc<RwLock<HashMap<String, User>>>,
    unavailable: AtomicBool,
}

impl MockUserCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Peek at an entry without going through the trait
    pub async fn cached(&self, email: &str) -> Option<User> {
        self.entries.read().await.get(email).cloned()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock user cache marked unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserCache for MockUserCache {
    async fn get(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.entries.read().await.get(email).cloned())
    }

    async fn set(&self, user: &User) -> Result<(), DomainError> {
        self.check_available()?;
        self.entries.write().await.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn invalidate(&self, email: &str) -> Result<(), DomainError> {
        self.check_available()?;
        self.entries.write().await.remove(email);
        Ok(())
    }
}
