//! HTTP DTOs for the RPC endpoint.

use axum::http::StatusCode;
use serde::Serialize;

use crate::application::dispatch::{ErrorKind, ProcedureSummary};

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Response of `GET /rpc/procedures`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureListResponse {
    pub procedures: Vec<ProcedureSummary>,
}

/// HTTP status for a failed call of the given kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
