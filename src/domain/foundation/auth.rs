//! Authenticated identity for the domain layer.
//!
//! An [`Identity`] is the user principal resolved from a live session. It is
//! only ever constructed from a [`Session`] that was found and not expired,
//! so holding one is proof that the caller authenticated.
//!
//! # Example
//!
//! ```ignore
//! let session = session_store.resolve(&token).await?;
//! let identity = session.as_ref().filter(|s| !s.is_expired()).map(Identity::from_session);
//! ```

use super::{Timestamp, UserId};
use crate::domain::session::{Session, SessionToken};

/// Authenticated user principal resolved from a session.
#[derive(Debug, Clone)]
pub struct Identity {
    user_id: UserId,
    session_token: SessionToken,
    expires_at: Timestamp,
}

impl Identity {
    /// Builds the identity carried by a live session.
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id().clone(),
            session_token: session.token().clone(),
            expires_at: *session.expires_at(),
        }
    }

    /// The authenticated user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Token of the session this identity was resolved from.
    pub fn session_token(&self) -> &SessionToken {
        &self.session_token
    }

    /// When the backing session expires.
    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }
}
