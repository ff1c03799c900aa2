//! Agent repository port (write side).
//!
//! Defines the contract for persisting Agent aggregates.

use async_trait::async_trait;

use crate::domain::agent::Agent;
use crate::domain::foundation::DomainError;

/// Repository port for Agent persistence.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Insert a new agent and return the row as stored.
    ///
    /// The returned agent carries the stored timestamps, which may be
    /// truncated to the store's precision.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError>;
}
