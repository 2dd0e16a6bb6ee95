//! User repository and cache traits.
//!
//! The repository is the source of truth and owns the email-uniqueness
//! constraint. The cache is a disposable copy keyed by email.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with the store-assigned id
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(AuthError::EmailAlreadyRegistered)` - The unique constraint on
    ///   email rejected the insert. Implementations must rely on the store's
    ///   constraint, never on a prior lookup.
    /// * `Err(DomainError::StoreUnavailable)` - Database error occurred
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Persist profile fields of `user`, and the password hash when
    /// `new_password_hash` is given
    ///
    /// # Returns
    /// * `Ok(User)` - The record as stored
    /// * `Err(AuthError::UserNotFound)` - No user with `user.id`
    async fn update(&self, user: User, new_password_hash: Option<String>) -> Result<User, DomainError>;
}

/// Email-keyed user cache
#[async_trait]
pub trait UserCache: Send + Sync {
    async fn get(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn set(&self, user: &User) -> Result<(), DomainError>;

    async fn invalidate(&self, email: &str) -> Result<(), DomainError>;
}
