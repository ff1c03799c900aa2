//! HTTP routes for the RPC endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{call_procedure, health, list_procedures, RpcState};

/// Creates the RPC router with all endpoints.
pub fn rpc_routes(state: RpcState) -> Router {
    Router::new()
        .route("/rpc", post(call_procedure))
        .route("/rpc/procedures", get(list_procedures))
        .route("/health", get(health))
        .with_state(state)
}
