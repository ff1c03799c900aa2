//! In-memory adapters.
//!
//! Back the ports with process-local maps. Used by tests and by local runs
//! that do not configure a database.

mod agent_store;
mod session_store;

pub use agent_store::InMemoryAgentStore;
pub use session_store::InMemorySessionStore;
