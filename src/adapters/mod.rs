//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - axum router exposing procedure calls
//! - `memory` - Process-local session and agent stores
//! - `postgres` - PostgreSQL session and agent stores

pub mod http;
pub mod memory;
pub mod postgres;

pub use self::http::{app_router, RpcState, SessionCookie};
pub use memory::{InMemoryAgentStore, InMemorySessionStore};
pub use postgres::{PostgresAgentReader, PostgresAgentRepository, PostgresSessionStore};
