//! GetSessionHandler - `auth.getSession`.

use async_trait::async_trait;
use serde::Serialize;

use crate::application::context::CallContext;
use crate::application::dispatch::{EmptyInput, ProcedureError, PublicProcedure};
use crate::domain::foundation::{Timestamp, UserId};

/// The caller's session, as exposed to clients. Never carries the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: UserId,
    pub expires_at: Timestamp,
}

/// Reports who the caller is, or `None` for anonymous callers.
#[derive(Debug, Default)]
pub struct GetSessionHandler;

impl GetSessionHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PublicProcedure for GetSessionHandler {
    type Input = EmptyInput;
    type Output = Option<SessionInfo>;

    async fn call(
        &self,
        _input: EmptyInput,
        ctx: &CallContext,
    ) -> Result<Option<SessionInfo>, ProcedureError> {
        Ok(ctx.identity().map(|identity| SessionInfo {
            user_id: identity.user_id().clone(),
            expires_at: *identity.expires_at(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Identity;
    use crate::domain::session::Session;
    use serde_json::json;

    #[tokio::test]
    async fn anonymous_caller_has_no_session() {
        let result = GetSessionHandler::new()
            .call(EmptyInput {}, &CallContext::anonymous())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn authenticated_caller_sees_user_and_expiry() {
        let session = Session::issue(UserId::new("user-a").unwrap(), 600);
        let ctx = CallContext::authenticated(Identity::from_session(&session));

        let info = GetSessionHandler::new()
            .call(EmptyInput {}, &ctx)
            .await
            .unwrap()
            .expect("session info");

        assert_eq!(info.user_id.as_str(), "user-a");
        assert_eq!(info.expires_at, *session.expires_at());
    }

    #[test]
    fn serializes_without_token() {
        let session = Session::issue(UserId::new("user-a").unwrap(), 600);
        let info = SessionInfo {
            user_id: session.user_id().clone(),
            expires_at: *session.expires_at(),
        };

        let value = serde_json::to_value(&info).unwrap();

        assert_eq!(value["userId"], json!("user-a"));
        assert!(value.get("expiresAt").is_some());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
