//! In-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{Session, SessionToken};
use crate::ports::SessionStore;

const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Sessions keyed by token digest, as the Postgres store keys them.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    failure: Arc<RwLock<Option<String>>>,
    ttl_secs: u64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECS)
    }

    /// Create a store whose new sessions live for `ttl_secs`.
    pub fn with_ttl(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            failure: Arc::new(RwLock::new(None)),
            ttl_secs,
        }
    }

    /// Store a prebuilt session, e.g. one that is already expired.
    pub async fn insert(&self, session: Session) {
        self.sessions
            .write()
            .await
            .insert(session.token().digest(), session);
    }

    /// Make every following operation fail with `message`.
    pub async fn fail_with(&self, message: &str) {
        *self.failure.write().await = Some(message.to_string());
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn check_failure(&self, context: &str) -> Result<(), DomainError> {
        match self.failure.read().await.as_deref() {
            Some(message) => Err(DomainError::database(context, message)),
            None => Ok(()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        self.check_failure("Failed to resolve session").await?;
        Ok(self.sessions.read().await.get(&token.digest()).cloned())
    }

    async fn create(&self, user_id: &UserId) -> Result<Session, DomainError> {
        self.check_failure("Failed to create session").await?;
        let session = Session::issue(user_id.clone(), self.ttl_secs);
        self.insert(session.clone()).await;
        Ok(session)
    }

    async fn invalidate(&self, token: &SessionToken) -> Result<(), DomainError> {
        self.check_failure("Failed to invalidate session").await?;
        self.sessions.write().await.remove(&token.digest());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn created_session_resolves() {
        let store = InMemorySessionStore::new();
        let session = store.create(&user()).await.unwrap();

        let resolved = store.resolve(session.token()).await.unwrap().unwrap();

        assert_eq!(resolved.user_id(), &user());
        assert_eq!(resolved.expires_at(), session.expires_at());
    }

    #[tokio::test]
    async fn resolve_accepts_equal_token_from_raw_string() {
        let store = InMemorySessionStore::new();
        let session = store.create(&user()).await.unwrap();
        let raw = SessionToken::new(session.token().expose()).unwrap();

        assert!(store.resolve(&raw).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let store = InMemorySessionStore::new();

        let resolved = store.resolve(&SessionToken::generate()).await.unwrap();

        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn invalidate_is_idempotent() {
        let store = InMemorySessionStore::new();
        let session = store.create(&user()).await.unwrap();

        store.invalidate(session.token()).await.unwrap();
        store.invalidate(session.token()).await.unwrap();

        assert!(store.resolve(session.token()).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn ttl_sets_expiry() {
        let store = InMemorySessionStore::with_ttl(60);
        let session = store.create(&user()).await.unwrap();

        assert_eq!(
            session.expires_at().as_unix_secs() - session.issued_at().as_unix_secs(),
            60
        );
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_database_error() {
        let store = InMemorySessionStore::new();
        store.fail_with("boom").await;

        let err = store.resolve(&SessionToken::generate()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
