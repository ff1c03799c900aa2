//! ListAgentsHandler - `agents.getMany`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dispatch::{EmptyInput, ProcedureError, ProtectedProcedure};
use crate::domain::foundation::Identity;
use crate::ports::{AgentReader, AgentView};

/// Handler for listing the caller's agents, newest first.
pub struct ListAgentsHandler {
    reader: Arc<dyn AgentReader>,
}

impl ListAgentsHandler {
    pub fn new(reader: Arc<dyn AgentReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl ProtectedProcedure for ListAgentsHandler {
    type Input = EmptyInput;
    type Output = Vec<AgentView>;

    async fn call(
        &self,
        _input: EmptyInput,
        identity: &Identity,
    ) -> Result<Vec<AgentView>, ProcedureError> {
        let agents = self.reader.list_for_owner(identity.user_id()).await?;
        tracing::debug!(owner_id = %identity.user_id(), count = agents.len(), "Listed agents");
        Ok(agents)
    }
}
