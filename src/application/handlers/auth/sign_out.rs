//! SignOutHandler - `auth.signOut`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::dispatch::{EmptyInput, ProcedureError, ProtectedProcedure};
use crate::domain::foundation::Identity;
use crate::ports::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignOutResult {
    pub success: bool,
}

/// Invalidates the session the call was made with.
pub struct SignOutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl SignOutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl ProtectedProcedure for SignOutHandler {
    type Input = EmptyInput;
    type Output = SignOutResult;

    async fn call(
        &self,
        _input: EmptyInput,
        identity: &Identity,
    ) -> Result<SignOutResult, ProcedureError> {
        self.sessions.invalidate(identity.session_token()).await?;

        tracing::info!(user_id = %identity.user_id(), "Session invalidated");

        Ok(SignOutResult { success: true })
    }
}
