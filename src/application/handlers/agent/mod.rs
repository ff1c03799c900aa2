//! Agent procedure handlers.

mod create_agent;
mod get_agent;
mod list_agents;

pub use create_agent::{CreateAgentHandler, CreateAgentInput};
pub use get_agent::{GetAgentHandler, GetAgentInput};
pub use list_agents::ListAgentsHandler;
