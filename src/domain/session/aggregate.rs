//! Authenticated session entity.
//!
//! A session binds an opaque token to a user for a bounded period. Sessions
//! are created by the sign-in flow, read on every call, and destroyed on
//! sign-out or expiry.

use crate::domain::foundation::{Timestamp, UserId};

use super::SessionToken;

/// Authenticated session.
///
/// # Invariants
///
/// - `expires_at` is after `issued_at` for freshly issued sessions
/// - A session is usable only while `now < expires_at`
#[derive(Debug, Clone)]
pub struct Session {
    token: SessionToken,
    user_id: UserId,
    issued_at: Timestamp,
    expires_at: Timestamp,
}

impl Session {
    /// Issues a new session for a user with a fresh random token.
    pub fn issue(user_id: UserId, ttl_secs: u64) -> Self {
        let now = Timestamp::now();
        Self {
            token: SessionToken::generate(),
            user_id,
            issued_at: now,
            expires_at: now.plus_secs(ttl_secs),
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        token: SessionToken,
        user_id: UserId,
        issued_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            token,
            user_id,
            issued_at,
            expires_at,
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn issued_at(&self) -> &Timestamp {
        &self.issued_at
    }

    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    /// Returns true if the session has expired as of the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }
}
