//! Per-call authorization context.
//!
//! ```text
//! raw token (optional) → ContextBuilder → SessionStore::resolve
//!                                 ↓
//!                     CallContext { identity? }  → Dispatcher
//! ```
//!
//! Building a context never fails because of the token itself: a missing,
//! blank, unknown, or expired token simply yields an anonymous context. Only
//! a failing session store is reported as an error.

use std::sync::Arc;

use crate::domain::foundation::{Identity, Timestamp};
use crate::domain::session::SessionToken;
use crate::ports::SessionStore;

use super::dispatch::ProcedureError;

/// Immutable context threaded into every procedure invocation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    identity: Option<Identity>,
}

impl CallContext {
    /// A context with no identity.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// A context carrying a resolved identity.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Resolves a caller's session into a [`CallContext`].
#[derive(Clone)]
pub struct ContextBuilder {
    sessions: Arc<dyn SessionStore>,
}

impl ContextBuilder {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Builds the context for a call carrying `raw_token`.
    ///
    /// # Errors
    ///
    /// - `ProcedureError::Store` if the session store fails
    pub async fn build(&self, raw_token: Option<&str>) -> Result<CallContext, ProcedureError> {
        let Some(raw_token) = raw_token else {
            return Ok(CallContext::anonymous());
        };

        let token = match SessionToken::new(raw_token) {
            Ok(token) => token,
            Err(_) => {
                tracing::debug!("Blank session token, treating call as anonymous");
                return Ok(CallContext::anonymous());
            }
        };

        let session = self.sessions.resolve(&token).await.map_err(|e| {
            tracing::error!(error = %e, "Session store failed to resolve token");
            ProcedureError::store(e)
        })?;

        match session {
            Some(session) if !session.is_expired_at(&Timestamp::now()) => {
                tracing::debug!(user_id = %session.user_id(), "Session resolved");
                Ok(CallContext::authenticated(Identity::from_session(&session)))
            }
            Some(session) => {
                tracing::debug!(user_id = %session.user_id(), "Session expired");
                Ok(CallContext::anonymous())
            }
            None => Ok(CallContext::anonymous()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::UserId;
    use crate::domain::session::Session;

    fn user() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[tokio::test]
    async fn no_token_yields_anonymous_context() {
        let builder = ContextBuilder::new(Arc::new(InMemorySessionStore::new()));

        let ctx = builder.build(None).await.unwrap();

        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn blank_token_yields_anonymous_context() {
        let builder = ContextBuilder::new(Arc::new(InMemorySessionStore::new()));

        let ctx = builder.build(Some("   ")).await.unwrap();

        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn unknown_token_yields_anonymous_context() {
        let builder = ContextBuilder::new(Arc::new(InMemorySessionStore::new()));

        let ctx = builder.build(Some("no-such-token")).await.unwrap();

        assert!(ctx.identity().is_none());
    }

    #[tokio::test]
    async fn live_session_yields_identity() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create(&user()).await.unwrap();
        let builder = ContextBuilder::new(store);

        let ctx = builder.build(Some(session.token().expose())).await.unwrap();

        let identity = ctx.identity().expect("identity");
        assert_eq!(identity.user_id(), &user());
    }

    #[tokio::test]
    async fn expired_session_yields_anonymous_context() {
        let store = Arc::new(InMemorySessionStore::new());
        let now = Timestamp::now();
        let expired = Session::reconstitute(
            SessionToken::generate(),
            user(),
            now.minus_secs(120),
            now.minus_secs(60),
        );
        store.insert(expired.clone()).await;
        let builder = ContextBuilder::new(store);

        let ctx = builder.build(Some(expired.token().expose())).await.unwrap();

        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn failing_store_is_a_store_error() {
        let store = Arc::new(InMemorySessionStore::new());
        store.fail_with("connection refused").await;
        let builder = ContextBuilder::new(store);

        let result = builder.build(Some("any-token")).await;

        assert!(matches!(result, Err(ProcedureError::Store(_))));
    }

    #[tokio::test]
    async fn failing_store_is_not_consulted_without_token() {
        let store = Arc::new(InMemorySessionStore::new());
        store.fail_with("connection refused").await;
        let builder = ContextBuilder::new(store);

        assert!(builder.build(None).await.is_ok());
    }
}
