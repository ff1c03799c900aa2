//! PostgreSQL implementation of AgentReader.
//!
//! Every query is scoped to the owner. Activity counts come from the
//! meetings table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::agent::Agent;
use crate::domain::foundation::{AgentId, DomainError, Timestamp, UserId};
use crate::ports::{AgentReader, AgentView};

/// PostgreSQL implementation of AgentReader.
#[derive(Clone)]
pub struct PostgresAgentReader {
    pool: PgPool,
}

impl PostgresAgentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentReader for PostgresAgentReader {
    async fn get_for_owner(
        &self,
        id: &AgentId,
        owner_id: &UserId,
    ) -> Result<Option<AgentView>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT a.id, a.user_id, a.name, a.instructions, a.created_at, a.updated_at,
                   COUNT(m.id) AS activity_count
            FROM agents a
            LEFT JOIN meetings m ON m.agent_id = a.id
            WHERE a.id = $1 AND a.user_id = $2
            GROUP BY a.id
            "#,
        )
        .bind(id.as_str())
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch agent", e))?;

        row.as_ref().map(row_to_view).transpose()
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<AgentView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.user_id, a.name, a.instructions, a.created_at, a.updated_at,
                   COUNT(m.id) AS activity_count
            FROM agents a
            LEFT JOIN meetings m ON m.agent_id = a.id
            WHERE a.user_id = $1
            GROUP BY a.id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch agents by owner", e))?;

        rows.iter().map(row_to_view).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

pub(super) fn row_to_agent(row: &sqlx::postgres::PgRow) -> Result<Agent, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DomainError::database("Failed to get id", e))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DomainError::database("Failed to get user_id", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::database("Failed to get name", e))?;
    let instructions: String = row
        .try_get("instructions")
        .map_err(|e| DomainError::database("Failed to get instructions", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::database("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| DomainError::database("Failed to get updated_at", e))?;

    Ok(Agent::reconstitute(
        AgentId::new(id)?,
        UserId::new(user_id)?,
        name,
        instructions,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_view(row: &sqlx::postgres::PgRow) -> Result<AgentView, DomainError> {
    let agent = row_to_agent(row)?;
    let activity_count: i64 = row
        .try_get("activity_count")
        .map_err(|e| DomainError::database("Failed to get activity_count", e))?;

    Ok(AgentView::from_agent(&agent, activity_count.max(0) as u64))
}
