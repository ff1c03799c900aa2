//! Agent aggregate entity.
//!
//! An agent is a user-owned assistant configuration: a display name and the
//! instructions it follows during meetings. Each agent belongs to exactly one
//! user; ownership is assigned at creation and never changes.

use crate::domain::foundation::{AgentId, Timestamp, UserId, ValidationError};

/// Validated, caller-supplied fields of a new agent.
///
/// Identifier, owner, and timestamps are deliberately absent: they are
/// assigned by the server when the draft becomes an [`Agent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDraft {
    name: String,
    instructions: String,
}

impl AgentDraft {
    /// Validates and trims a new agent's fields.
    ///
    /// # Errors
    ///
    /// - `Required` on `name` if blank
    /// - `Required` on `instructions` if blank
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::required("name", "Name is required"));
        }

        let instructions = instructions.into().trim().to_string();
        if instructions.is_empty() {
            return Err(ValidationError::required(
                "instructions",
                "Instructions are required",
            ));
        }

        Ok(Self { name, instructions })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

/// Agent aggregate.
///
/// # Invariants
///
/// - `id` is unique
/// - `owner_id` is the identity that created the agent
/// - `name` and `instructions` are non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    owner_id: UserId,
    name: String,
    instructions: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Agent {
    /// Create a new agent owned by `owner_id`.
    pub fn create(owner_id: UserId, draft: AgentDraft) -> Self {
        let now = Timestamp::now();
        Self {
            id: AgentId::generate(),
            owner_id,
            name: draft.name,
            instructions: draft.instructions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an agent from persistence (no validation).
    pub fn reconstitute(
        id: AgentId,
        owner_id: UserId,
        name: String,
        instructions: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            instructions,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if `user_id` owns this agent.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}
