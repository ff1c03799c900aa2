//! PostgreSQL implementation of SessionStore.
//!
//! Only the SHA-256 digest of a token is persisted. Resolving rebuilds the
//! session around the token the caller presented.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::session::{Session, SessionToken};
use crate::ports::SessionStore;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
    ttl_secs: u64,
}

impl PostgresSessionStore {
    /// Creates a store whose new sessions live for `ttl_secs`.
    pub fn new(pool: PgPool, ttl_secs: u64) -> Self {
        Self { pool, ttl_secs }
    }

    /// Deletes every session that expired before now. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(Timestamp::now().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to purge sessions", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, issued_at, expires_at
            FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token.digest())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session", e))?;

        match row {
            Some(row) => Ok(Some(row_to_session(token, row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user_id: &UserId) -> Result<Session, DomainError> {
        let session = Session::issue(user_id.clone(), self.ttl_secs);

        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.token().digest())
        .bind(session.user_id().as_str())
        .bind(session.issued_at().as_datetime())
        .bind(session.expires_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert session", e))?;

        Ok(session)
    }

    async fn invalidate(&self, token: &SessionToken) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token.digest())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete session", e))?;

        Ok(())
    }
}

fn row_to_session(token: &SessionToken, row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DomainError::database("Failed to get user_id", e))?;
    let issued_at: chrono::DateTime<chrono::Utc> = row
        .try_get("issued_at")
        .map_err(|e| DomainError::database("Failed to get issued_at", e))?;
    let expires_at: chrono::DateTime<chrono::Utc> = row
        .try_get("expires_at")
        .map_err(|e| DomainError::database("Failed to get expires_at", e))?;

    Ok(Session::reconstitute(
        token.clone(),
        UserId::new(user_id)?,
        Timestamp::from_datetime(issued_at),
        Timestamp::from_datetime(expires_at),
    ))
}
