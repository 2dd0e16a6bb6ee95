//! Session service for fingerprint-bound JWT sessions
//!
//! Tokens are HS256-signed, expire after the configured lifetime and are
//! only accepted from the client (User-Agent) they were issued to. There is
//! no refresh token and no revocation list.

mod service;


pub use service::SessionService;
