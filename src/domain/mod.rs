//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, identity, errors)
//! - `session` - Authenticated sessions and their tokens
//! - `agent` - User-owned agents

pub mod agent;
pub mod foundation;
pub mod session;
