//! MySQL implementation of the UserRepository trait.
//!
//! Expected table:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            BIGINT       NOT NULL AUTO_INCREMENT PRIMARY KEY,
//!     email         VARCHAR(255) NOT NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     nickname      VARCHAR(64)  NOT NULL DEFAULT '',
//!     birthday      VARCHAR(10)  NOT NULL DEFAULT '',
//!     info          VARCHAR(255) NOT NULL DEFAULT '',
//!     created_at    DATETIME(3)  NOT NULL,
//!     updated_at    DATETIME(3)  NOT NULL,
//!     UNIQUE KEY uk_users_email (email)
//! ) DEFAULT CHARSET = utf8mb4;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pp_core::domain::entities::{NewUser, User};
use pp_core::errors::{AuthError, DomainError};
use pp_core::repositories::UserRepository;

use crate::InfrastructureError;

/// MySQL error code for duplicate entries on a unique key
const ER_DUP_ENTRY: &str = "1062";

const USER_COLUMNS: &str =
    "id, email, password_hash, nickname, birthday, info, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, InfrastructureError> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            nickname: row.try_get("nickname")?,
            birthday: row.try_get("birthday")?,
            info: row.try_get("info")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }

    async fn find_one(&self, filter: &str, bind: FindBy<'_>) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);
        let query = sqlx::query(&query);
        let query = match bind {
            FindBy::Email(email) => query.bind(email),
            FindBy::Id(id) => query.bind(id),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

enum FindBy<'a> {
    Email(&'a str),
    Id(i64),
}

/// Whether an insert failed on a unique key
pub(crate) fn is_duplicate_entry(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(ER_DUP_ENTRY) || db_err.is_unique_violation()
        }
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();

        // No existence pre-check: the unique key on email decides
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, nickname, birthday, info, created_at, updated_at)
            VALUES (?, ?, '', '', '', ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = i64::try_from(done.last_insert_id()).map_err(|_| {
                    DomainError::store_unavailable("users.id overflowed BIGINT")
                })?;
                Ok(user.into_user(id, now))
            }
            Err(e) if is_duplicate_entry(&e) => Err(AuthError::EmailAlreadyRegistered.into()),
            Err(e) => Err(InfrastructureError::from(e).into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", FindBy::Email(email)).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.find_one("id", FindBy::Id(id)).await
    }

    async fn update(&self, user: User, new_password_hash: Option<String>) -> Result<User, DomainError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = COALESCE(?, password_hash),
                nickname = ?,
                birthday = ?,
                info = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(new_password_hash.as_deref())
        .bind(&user.nickname)
        .bind(&user.birthday)
        .bind(&user.info)
        .bind(now)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(InfrastructureError::from)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}
