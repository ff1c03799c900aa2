//! Application layer - call context, procedure dispatch, and handlers.
//!
//! This layer resolves who is calling, enforces access tiers, and routes
//! each named procedure to the handler that owns it.

pub mod context;
pub mod dispatch;
pub mod handlers;
pub mod procedures;

pub use context::{CallContext, ContextBuilder};
pub use dispatch::{CallResult, Dispatcher, ErrorKind, ProcedureCall, ProcedureError};
pub use procedures::{build_registry, ProcedureDeps};
