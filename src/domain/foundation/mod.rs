//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Meet Assist domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::Identity;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AgentId, MeetingId, UserId};
pub use timestamp::Timestamp;
