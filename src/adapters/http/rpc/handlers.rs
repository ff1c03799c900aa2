//! HTTP handlers for the RPC endpoint.

use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::{SessionCookie, SessionCredential};
use crate::application::dispatch::{CallResult, Dispatcher, ProcedureCall, ProcedureError};

use super::dto::{status_for, HealthResponse, ProcedureListResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RpcState {
    dispatcher: Dispatcher,
    cookie_name: SessionCookie,
}

impl RpcState {
    pub fn new(dispatcher: Dispatcher, cookie_name: SessionCookie) -> Self {
        Self {
            dispatcher,
            cookie_name,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl FromRef<RpcState> for SessionCookie {
    fn from_ref(state: &RpcState) -> Self {
        state.cookie_name.clone()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /rpc - Invoke a named procedure
pub async fn call_procedure(
    State(state): State<RpcState>,
    SessionCredential(header_token): SessionCredential,
    payload: Result<Json<ProcedureCall>, JsonRejection>,
) -> Response {
    let mut call = match payload {
        Ok(Json(call)) => call,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Malformed RPC request body");
            let error = ProcedureError::validation("body", rejection.body_text());
            return envelope(CallResult::failure(&error));
        }
    };

    if call.session_token.as_deref().map_or(true, |t| t.trim().is_empty()) {
        call.session_token = header_token;
    }

    envelope(state.dispatcher.handle(call).await)
}

/// GET /rpc/procedures - List registered procedures and their access tiers
pub async fn list_procedures(State(state): State<RpcState>) -> Json<ProcedureListResponse> {
    Json(ProcedureListResponse {
        procedures: state.dispatcher.registry().summaries(),
    })
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

fn envelope(result: CallResult) -> Response {
    let status = result.error_kind().map_or(StatusCode::OK, status_for);
    (status, Json(result)).into_response()
}
