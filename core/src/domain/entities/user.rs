//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as persisted by the account store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,

    /// Login email, unique across all users
    pub email: String,

    /// bcrypt hash of the password
    #[serde(rename = "password_hash")]
    pub password_hash: String,

    /// Display name, at most 15 characters
    pub nickname: String,

    /// `YYYY-MM-DD`, empty when not provided
    pub birthday: String,

    /// Short self-introduction, at most 50 characters
    pub info: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply profile fields and bump `updated_at`
    pub fn apply_profile(&mut self, nickname: String, birthday: String, info: String) {
        self.nickname = nickname;
        self.birthday = birthday;
        self.info = info;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// A user that has not been persisted yet; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Materialize the record with the id the store assigned
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            nickname: String::new(),
            birthday: String::new(),
            info: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
