//! Value objects representing immutable domain concepts.

pub mod profile;

// Re-export commonly used types
pub use profile::ProfileUpdate;
