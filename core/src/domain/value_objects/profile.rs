//! Editable profile fields.

use serde::{Deserialize, Serialize};

/// Profile fields submitted on edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub nickname: String,
    /// `YYYY-MM-DD` or empty
    pub birthday: String,
    pub info: String,
}

impl ProfileUpdate {
    pub fn new(nickname: impl Into<String>, birthday: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            birthday: birthday.into(),
            info: info.into(),
        }
    }
}
