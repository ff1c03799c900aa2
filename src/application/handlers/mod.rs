//! Application handlers.
//!
//! One handler per procedure. Each holds the ports it needs and implements
//! either `PublicProcedure` or `ProtectedProcedure`.

pub mod agent;
pub mod auth;

pub use agent::{
    CreateAgentHandler, CreateAgentInput, GetAgentHandler, GetAgentInput, ListAgentsHandler,
};
pub use auth::{GetSessionHandler, SessionInfo, SignOutHandler, SignOutResult};
