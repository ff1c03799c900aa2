//! HTTP middleware for axum.
//!
//! - `auth` - Session credential extraction

pub mod auth;

pub use auth::{bearer_token, cookie_value, SessionCookie, SessionCredential};
