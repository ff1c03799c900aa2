//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionStore` - Resolve, issue, and invalidate session tokens
//!
//! ## Agent Ports
//!
//! - `AgentRepository` - Agent persistence (write side)
//! - `AgentReader` - Owner-scoped agent queries with activity counts

mod agent_reader;
mod agent_repository;
mod session_store;

pub use agent_reader::{sort_newest_first, AgentReader, AgentView};
pub use agent_repository::AgentRepository;
pub use session_store::SessionStore;
