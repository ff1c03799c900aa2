//! GetAgentHandler - `agents.getOne`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::dispatch::{ProcedureError, ProcedureInput, ProtectedProcedure};
use crate::domain::foundation::{AgentId, Identity, ValidationError};
use crate::ports::{AgentReader, AgentView};

/// Input of `agents.getOne`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetAgentInput {
    pub id: String,
}

impl ProcedureInput for GetAgentInput {
    fn validate(&self) -> Result<(), ValidationError> {
        AgentId::new(self.id.as_str()).map(|_| ())
    }
}

/// Handler for fetching one of the caller's agents.
///
/// Returns `None` rather than an error when nothing matches, including when
/// the id belongs to another user's agent.
pub struct GetAgentHandler {
    reader: Arc<dyn AgentReader>,
}

impl GetAgentHandler {
    pub fn new(reader: Arc<dyn AgentReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl ProtectedProcedure for GetAgentHandler {
    type Input = GetAgentInput;
    type Output = Option<AgentView>;

    async fn call(
        &self,
        input: GetAgentInput,
        identity: &Identity,
    ) -> Result<Option<AgentView>, ProcedureError> {
        let id = AgentId::new(input.id)?;
        let agent = self.reader.get_for_owner(&id, identity.user_id()).await?;

        if agent.is_none() {
            tracing::debug!(agent_id = %id, "Agent not found for caller");
        }

        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAgentStore;
    use crate::application::dispatch::{decode_input, ErrorKind};
    use crate::domain::agent::{Agent, AgentDraft};
    use crate::domain::foundation::UserId;
    use crate::domain::session::Session;
    use crate::ports::AgentRepository;
    use serde_json::json;

    fn identity(user: &str) -> Identity {
        Identity::from_session(&Session::issue(UserId::new(user).unwrap(), 600))
    }

    async fn seeded(owner: &str) -> (Arc<InMemoryAgentStore>, Agent) {
        let store = Arc::new(InMemoryAgentStore::new());
        let agent = Agent::create(
            UserId::new(owner).unwrap(),
            AgentDraft::new("Sales Bot", "Qualify leads").unwrap(),
        );
        let agent = store.insert(&agent).await.unwrap();
        (store, agent)
    }

    #[tokio::test]
    async fn returns_owned_agent_with_activity_count() {
        let (store, agent) = seeded("user-a").await;
        store.record_meeting(agent.id()).await;
        store.record_meeting(agent.id()).await;
        let handler = GetAgentHandler::new(store);

        let view = handler
            .call(GetAgentInput { id: agent.id().to_string() }, &identity("user-a"))
            .await
            .unwrap()
            .expect("agent");

        assert_eq!(view.id, *agent.id());
        assert_eq!(view.name, "Sales Bot");
        assert_eq!(view.activity_count, 2);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let (store, _) = seeded("user-a").await;
        let handler = GetAgentHandler::new(store);

        let result = handler
            .call(GetAgentInput { id: "missing".to_string() }, &identity("user-a"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn other_owners_agent_is_none() {
        let (store, agent) = seeded("user-a").await;
        let handler = GetAgentHandler::new(store);

        let result = handler
            .call(GetAgentInput { id: agent.id().to_string() }, &identity("user-b"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn blank_id_fails_validation() {
        let err = decode_input::<GetAgentInput>(json!({ "id": "" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.field(), Some("id"));
    }
}
