//! HTTP adapter for procedure calls.

mod dto;
mod handlers;
mod routes;

pub use dto::{status_for, HealthResponse, ProcedureListResponse};
pub use handlers::RpcState;
pub use routes::rpc_routes;
