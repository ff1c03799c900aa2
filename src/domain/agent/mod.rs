//! Agent domain module.
//!
//! User-owned assistant configurations that meetings are held with.

mod aggregate;

pub use aggregate::{Agent, AgentDraft};
