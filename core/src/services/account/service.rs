//! Main account service implementation

use std::sync::Arc;

use tokio::sync::OnceCell;

use pp_shared::validation::{
    validate_birthday, validate_email, validate_info, validate_nickname, validate_password,
    validate_password_confirmation,
};

use crate::domain::entities::user::{NewUser, User};
use crate::domain::value_objects::ProfileUpdate;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::session::SessionService;

use super::config::AccountServiceConfig;
use super::password::{hash_password, verify_password};

/// Account use cases over a user repository and the session service
pub struct AccountService<U: UserRepository> {
    users: Arc<U>,
    sessions: Arc<SessionService>,
    config: AccountServiceConfig,
    /// Hash checked for unknown emails so both failure paths cost one bcrypt
    dummy_hash: OnceCell<String>,
}

impl<U: UserRepository> AccountService<U> {
    pub fn new(users: Arc<U>, sessions: Arc<SessionService>, config: AccountServiceConfig) -> Self {
        Self {
            users,
            sessions,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new account
    ///
    /// # Errors
    /// * `ValidationError` - bad email, weak password or confirmation mismatch
    /// * `AuthError::EmailAlreadyRegistered` - the email is taken
    pub async fn signup(&self, email: &str, password: &str, confirm_password: &str) -> DomainResult<User> {
        validate_email(email)?;
        validate_password("password", password)?;
        validate_password_confirmation(password, confirm_password)?;

        let password_hash = self.hash(password).await?;
        let user = self.users.create(NewUser::new(email, password_hash)).await.map_err(|e| {
            if matches!(e, DomainError::Auth(AuthError::EmailAlreadyRegistered)) {
                tracing::info!(event = "signup_duplicate_email", "Signup rejected, email already registered");
            }
            e
        })?;

        tracing::info!(user_id = user.id, event = "user_registered", "New account registered");
        Ok(user)
    }

    /// Check credentials
    ///
    /// Unknown email and wrong password both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let Some(user) = self.users.find_by_email(email).await? else {
            let dummy_hash = self
                .dummy_hash
                .get_or_try_init(|| self.hash("unknown-account-placeholder"))
                .await?;
            self.verify(password, dummy_hash).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.verify(password, &user.password_hash).await? {
            tracing::info!(user_id = user.id, event = "login_wrong_password", "Password check failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Authenticate and issue a session bound to `fingerprint`
    pub async fn login(&self, email: &str, password: &str, fingerprint: &str) -> DomainResult<(User, String)> {
        let user = self.authenticate(email, password).await?;
        let token = self.sessions.issue(&user, fingerprint)?;

        tracing::info!(user_id = user.id, event = "user_logged_in", "Session issued");
        Ok((user, token))
    }

    /// Update profile fields, and the password when `new_password` is given
    ///
    /// The current password is re-checked before anything is written.
    pub async fn edit(
        &self,
        email: &str,
        password: &str,
        new_password: Option<&str>,
        profile: ProfileUpdate,
    ) -> DomainResult<User> {
        if let Some(new_password) = new_password {
            validate_password("new_password", new_password)?;
        }
        validate_nickname(&profile.nickname)?;
        validate_info(&profile.info)?;
        validate_birthday(&profile.birthday)?;

        let mut user = self.authenticate(email, password).await?;

        let new_password_hash = match new_password {
            Some(new_password) => Some(self.hash(new_password).await?),
            None => None,
        };

        user.apply_profile(profile.nickname, profile.birthday, profile.info);
        let updated = self.users.update(user, new_password_hash).await?;

        tracing::info!(user_id = updated.id, event = "profile_updated", "Account profile updated");
        Ok(updated)
    }

    /// Load the account behind a session token
    pub async fn profile(&self, token: &str, fingerprint: &str) -> DomainResult<User> {
        let uid = self.sessions.validate(token, fingerprint)?;

        self.users
            .find_by_id(uid)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    #[cfg(test)]
    pub(crate) fn dummy_hash_initialized(&self) -> bool {
        self.dummy_hash.initialized()
    }

    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    async fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?
    }
}
