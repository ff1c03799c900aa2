//! Session procedure handlers.

mod get_session;
mod sign_out;

pub use get_session::{GetSessionHandler, SessionInfo};
pub use sign_out::{SignOutHandler, SignOutResult};
