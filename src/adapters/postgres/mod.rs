//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSessionStore` - Token-digest keyed sessions
//! - `PostgresAgentRepository` - Agent inserts
//! - `PostgresAgentReader` - Owner-scoped agent queries with activity counts

mod agent_reader;
mod agent_repository;
mod session_store;

pub use agent_reader::PostgresAgentReader;
pub use agent_repository::PostgresAgentRepository;
pub use session_store::PostgresSessionStore;

/// Embedded migrations under `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
