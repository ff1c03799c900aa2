//! Procedure wiring.
//!
//! Assembles the registry served by the RPC endpoint from the ports chosen at
//! startup.

use std::sync::Arc;

use crate::application::dispatch::{ProcedureRegistry, RegistryError};
use crate::application::handlers::{
    CreateAgentHandler, GetAgentHandler, GetSessionHandler, ListAgentsHandler, SignOutHandler,
};
use crate::ports::{AgentReader, AgentRepository, SessionStore};

pub const AGENTS_GET_ONE: &str = "agents.getOne";
pub const AGENTS_GET_MANY: &str = "agents.getMany";
pub const AGENTS_CREATE: &str = "agents.create";
pub const AUTH_GET_SESSION: &str = "auth.getSession";
pub const AUTH_SIGN_OUT: &str = "auth.signOut";

/// Ports the procedures depend on.
#[derive(Clone)]
pub struct ProcedureDeps {
    pub sessions: Arc<dyn SessionStore>,
    pub agents: Arc<dyn AgentRepository>,
    pub agent_reader: Arc<dyn AgentReader>,
}

/// Builds the registry of every procedure this service exposes.
///
/// # Errors
///
/// - `RegistryError` if two procedures are registered under one name
pub fn build_registry(deps: ProcedureDeps) -> Result<ProcedureRegistry, RegistryError> {
    ProcedureRegistry::builder()
        .protected(AGENTS_GET_ONE, GetAgentHandler::new(deps.agent_reader.clone()))
        .protected(AGENTS_GET_MANY, ListAgentsHandler::new(deps.agent_reader))
        .protected(AGENTS_CREATE, CreateAgentHandler::new(deps.agents))
        .public(AUTH_GET_SESSION, GetSessionHandler::new())
        .protected(AUTH_SIGN_OUT, SignOutHandler::new(deps.sessions))
        .build()
}
