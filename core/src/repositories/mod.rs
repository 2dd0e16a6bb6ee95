pub mod code;
pub mod user;

pub use code::{CodeRepository, CodeStorePolicy, CodeVerification, MockCodeRepository};
pub use user::{CachedUserRepository, MockUserCache, MockUserRepository, UserCache, UserRepository};
