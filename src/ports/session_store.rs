//! Session store port.
//!
//! Defines the contract for persisting authenticated sessions keyed by an
//! opaque token. The sign-in flow creates sessions; the procedure layer only
//! resolves them (and invalidates them on sign-out).
//!
//! # Contract
//!
//! - `resolve` returns `Ok(None)` for unknown tokens; it never errors because a
//!   token is bad, only because the store itself failed
//! - `resolve` may return an expired session; callers decide what expiry means
//! - `invalidate` is idempotent

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{Session, SessionToken};

/// Port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up the session identified by `token`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the store is unreachable or returns malformed data
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;

    /// Issue and persist a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user_id: &UserId) -> Result<Session, DomainError>;

    /// Destroy the session identified by `token`. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn invalidate(&self, token: &SessionToken) -> Result<(), DomainError>;
}
