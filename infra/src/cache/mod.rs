//! Cache module for Redis-backed storage
//!
//! Provides the Redis client with retry logic, the verification code store
//! (Lua scripts for atomic check-and-set) and the email-keyed user cache.

pub mod code_store;
pub mod redis_client;
pub mod user_cache;

#[cfg(test)]
mod tests;

pub use code_store::RedisCodeRepository;
pub use redis_client::RedisClient;
pub use user_cache::RedisUserCache;

// Re-export commonly used types
pub use pp_shared::CacheConfig;
