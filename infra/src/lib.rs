//! # Infrastructure Layer
//!
//! Concrete implementations of the Passport core seams:
//! - **Cache**: Redis client, Redis-backed code store and user cache
//! - **Database**: MySQL pool and user repository using SQLx
//! - **SMS**: mock and Twilio providers behind `SmsSender`
//! - **Telemetry**: tracing subscriber setup
//!
//! [`initialize`] assembles the account and code services from an
//! [`AppConfig`].

use std::sync::Arc;

use pp_core::errors::{CodeError, DomainError};
use pp_core::{
    AccountService, AccountServiceConfig, CachedUserRepository, CodeService, CodeServiceConfig,
    CodeStorePolicy, SessionService, SmsSender,
};
use pp_shared::AppConfig;

/// Cache module - Redis client and Redis-backed stores
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Logging setup
pub mod telemetry;

use cache::{RedisClient, RedisCodeRepository, RedisUserCache};
use database::{DatabasePool, MySqlUserRepository};

/// User store used in production: MySQL behind the Redis user cache
pub type UserStore = CachedUserRepository<MySqlUserRepository, RedisUserCache>;

/// Assembled services sharing one MySQL pool and one Redis connection
#[derive(Clone)]
pub struct InfrastructureServices {
    pub database: DatabasePool,
    pub redis: RedisClient,
    pub sessions: Arc<SessionService>,
    pub accounts: Arc<AccountService<UserStore>>,
    pub codes: Arc<CodeService<RedisCodeRepository, dyn SmsSender>>,
}

impl InfrastructureServices {
    /// Check both backing stores
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let database = self.database.health_check().await?;
        let redis = self.redis.health_check().await?;
        Ok(database && redis)
    }
}

/// Connect to MySQL and Redis and wire the services
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    if config.jwt.is_using_default_secret() {
        tracing::warn!("Using the default JWT secret; set PASSPORT__JWT__SECRET outside development");
    }

    let database = DatabasePool::new(config.database.clone()).await?;
    let redis = RedisClient::new(config.cache.clone()).await?;

    let users = Arc::new(CachedUserRepository::new(
        Arc::new(MySqlUserRepository::new(database.get_pool().clone())),
        Arc::new(RedisUserCache::new(redis.clone(), config.cache.user_ttl)),
    ));
    let sessions = Arc::new(SessionService::new(&config.jwt));
    let accounts = Arc::new(AccountService::new(
        users,
        sessions.clone(),
        AccountServiceConfig::default(),
    ));

    let code_store = Arc::new(RedisCodeRepository::new(
        redis.clone(),
        CodeStorePolicy::from(&config.verification),
    ));
    let sms_sender = sms::create_sms_sender(&config.sms)?;
    let codes = Arc::new(CodeService::new(
        code_store,
        sms_sender,
        CodeServiceConfig::from(&config.verification),
    ));

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        database,
        redis,
        sessions,
        accounts,
        codes,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

/// Collapse infrastructure failures into the domain's store and delivery
/// errors; backend detail only travels in the log-only `message`
impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Sms(_) | InfrastructureError::Http(_) => {
                tracing::error!(error = %err, event = "sms_delivery_failed", "SMS provider failure");
                CodeError::SmsDeliveryFailed.into()
            }
            other => DomainError::store_unavailable(other),
        }
    }
}
