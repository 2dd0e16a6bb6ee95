//! Business services containing domain logic and use cases.

pub mod account;
pub mod code;
pub mod session;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use code::{CodeService, CodeServiceConfig, SmsSender};
pub use session::SessionService;
