//! Session domain module.
//!
//! Authenticated sessions and the opaque tokens that identify them.

mod aggregate;
mod token;

pub use aggregate::Session;
pub use token::SessionToken;
