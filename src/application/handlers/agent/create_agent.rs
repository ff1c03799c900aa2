//! CreateAgentHandler - `agents.create`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::dispatch::{ProcedureError, ProcedureInput, ProtectedProcedure};
use crate::domain::agent::{Agent, AgentDraft};
use crate::domain::foundation::{Identity, ValidationError};
use crate::ports::{AgentRepository, AgentView};

/// Creation shape of an agent.
///
/// Only caller-defined fields are declared. Fields such as `id`, `ownerId`
/// or `userId` in the payload are ignored during decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgentInput {
    pub name: String,
    pub instructions: String,
}

impl CreateAgentInput {
    fn draft(&self) -> Result<AgentDraft, ValidationError> {
        AgentDraft::new(self.name.as_str(), self.instructions.as_str())
    }
}

impl ProcedureInput for CreateAgentInput {
    fn validate(&self) -> Result<(), ValidationError> {
        self.draft().map(|_| ())
    }
}

/// Handler for creating agents.
pub struct CreateAgentHandler {
    repository: Arc<dyn AgentRepository>,
}

impl CreateAgentHandler {
    pub fn new(repository: Arc<dyn AgentRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProtectedProcedure for CreateAgentHandler {
    type Input = CreateAgentInput;
    type Output = AgentView;

    async fn call(
        &self,
        input: CreateAgentInput,
        identity: &Identity,
    ) -> Result<AgentView, ProcedureError> {
        // Owner always comes from the session, never from the payload
        let agent = Agent::create(identity.user_id().clone(), input.draft()?);

        let stored = self.repository.insert(&agent).await?;

        tracing::info!(
            agent_id = %stored.id(),
            owner_id = %stored.owner_id(),
            "Agent created"
        );

        Ok(AgentView::from_agent(&stored, 0))
    }
}
