//! PostgreSQL implementation of AgentRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::agent::Agent;
use crate::domain::foundation::DomainError;
use crate::ports::AgentRepository;

use super::agent_reader::row_to_agent;

/// PostgreSQL implementation of AgentRepository.
#[derive(Clone)]
pub struct PostgresAgentRepository {
    pool: PgPool,
}

impl PostgresAgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for PostgresAgentRepository {
    async fn insert(&self, agent: &Agent) -> Result<Agent, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO agents (id, user_id, name, instructions, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, instructions, created_at, updated_at
            "#,
        )
        .bind(agent.id().as_str())
        .bind(agent.owner_id().as_str())
        .bind(agent.name())
        .bind(agent.instructions())
        .bind(agent.created_at().as_datetime())
        .bind(agent.updated_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert agent", e))?;

        row_to_agent(&row)
    }
}
