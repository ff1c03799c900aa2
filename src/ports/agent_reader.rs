//! Agent reader port (read side).
//!
//! Read-optimized views of agents, decorated with the derived activity count.
//! Every query is scoped to the owner: an agent that belongs to someone else
//! is indistinguishable from one that does not exist.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::agent::Agent;
use crate::domain::foundation::{AgentId, DomainError, Timestamp, UserId};

/// Reader port for agent queries.
#[async_trait]
pub trait AgentReader: Send + Sync {
    /// Get one agent owned by `owner_id`.
    ///
    /// Returns `None` if no agent with that id exists or it has another owner.
    async fn get_for_owner(
        &self,
        id: &AgentId,
        owner_id: &UserId,
    ) -> Result<Option<AgentView>, DomainError>;

    /// List every agent owned by `owner_id`.
    ///
    /// Returns agents ordered by `created_at` descending, then `id` descending.
    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AgentView>, DomainError>;
}

/// Agent as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentView {
    pub id: AgentId,
    pub owner_id: UserId,
    pub name: String,
    pub instructions: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Number of meetings held with this agent.
    pub activity_count: u64,
}

impl AgentView {
    /// Builds a view of an agent with the given activity count.
    pub fn from_agent(agent: &Agent, activity_count: u64) -> Self {
        Self {
            id: agent.id().clone(),
            owner_id: agent.owner_id().clone(),
            name: agent.name().to_string(),
            instructions: agent.instructions().to_string(),
            created_at: *agent.created_at(),
            updated_at: *agent.updated_at(),
            activity_count,
        }
    }
}

/// Orders views newest first, breaking ties by id so the order is total.
pub fn sort_newest_first(views: &mut [AgentView]) {
    views.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
