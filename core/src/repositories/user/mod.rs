pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod cached;
pub mod mock;

pub use cached::CachedUserRepository;
pub use mock::{MockUserCache, MockUserRepository};
pub use r#trait::{UserCache, UserRepository};

#[cfg(test)]
mod tests;
