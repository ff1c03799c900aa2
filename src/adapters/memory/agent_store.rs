//! In-memory agent store.
//!
//! Implements both the write and read side of agents, plus a meetings map so
//! activity counts can be exercised without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::agent::Agent;
use crate::domain::foundation::{AgentId, DomainError, MeetingId, UserId};
use crate::ports::{sort_newest_first, AgentReader, AgentRepository, AgentView};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentStore {
    agents: Arc<RwLock<HashMap<AgentId, Agent>>>,
    meetings: Arc<RwLock<HashMap<MeetingId, AgentId>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a meeting held with `agent_id`.
    pub async fn record_meeting(&self, agent_id: &AgentId) -> MeetingId {
        let id = MeetingId::new();
        self.meetings.write().await.insert(id, agent_id.clone());
        id
    }

    /// Make every following operation fail with `message`.
    pub async fn fail_with(&self, message: &str) {
        *self.failure.write().await = Some(message.to_string());
    }

    /// Get the number of stored agents across all owners
    pub async fn agent_count(&self) -> usize {
        self.agents.read().await.len()
    }

    async fn check_failure(&self, context: &str) -> Result<(), DomainError> {
        match self.failure.read().await.as_deref() {
            Some(message) => Err(DomainError::database(context, message)),
            None => Ok(()),
        }
    }

    /// Meetings per agent, in a single pass over the meetings map.
    async fn activity_counts(&self) -> HashMap<AgentId, u64> {
        let mut counts = HashMap::new();
        for agent_id in self.meetings.read().await.values() {
            *counts.entry(agent_id.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentStore {
    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError> {
        self.check_failure("Failed to insert agent").await?;
        let mut agents = self.agents.write().await;
        if agents.contains_key(agent.id()) {
            return Err(DomainError::database(
                "Failed to insert agent",
                format!("duplicate id {}", agent.id()),
            ));
        }
        agents.insert(agent.id().clone(), agent.clone());
        Ok(agent.clone())
    }
}

#[async_trait]
impl AgentReader for InMemoryAgentStore {
    async fn get_for_owner(
        &self,
        id: &AgentId,
        owner_id: &UserId,
    ) -> Result<Option<AgentView>, DomainError> {
        self.check_failure("Failed to get agent").await?;
        let agent = self
            .agents
            .read()
            .await
            .get(id)
            .filter(|a| a.is_owned_by(owner_id))
            .cloned();

        let Some(agent) = agent else {
            return Ok(None);
        };
        let counts = self.activity_counts().await;
        let count = counts.get(agent.id()).copied().unwrap_or(0);
        Ok(Some(AgentView::from_agent(&agent, count)))
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AgentView>, DomainError> {
        self.check_failure("Failed to list agents").await?;
        let owned: Vec<Agent> = self
            .agents
            .read()
            .await
            .values()
            .filter(|a| a.is_owned_by(owner_id))
            .cloned()
            .collect();

        let counts = self.activity_counts().await;
        let mut views: Vec<AgentView> = owned
            .iter()
            .map(|agent| {
                AgentView::from_agent(agent, counts.get(agent.id()).copied().unwrap_or(0))
            })
            .collect();
        sort_newest_first(&mut views);
        Ok(views)
    }
}
