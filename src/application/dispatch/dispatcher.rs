//! Procedure dispatcher.
//!
//! ```text
//! received ──tier ok──▶ authorized ──▶ executing ──▶ succeeded | failed
//!    │
//!    └──protected, no identity──▶ rejected
//! ```
//!
//! The access tier is enforced before input is decoded and before the handler
//! runs. Every outcome is returned as a [`CallResult`].

use std::sync::Arc;
use std::time::Instant;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::application::context::{CallContext, ContextBuilder};

use super::{AccessTier, ErrorKind, ProcedureError, ProcedureRegistry};

/// Inbound call as received from a transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureCall {
    pub procedure_name: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl ProcedureCall {
    pub fn new(procedure_name: impl Into<String>, input: Value) -> Self {
        Self {
            procedure_name: procedure_name.into(),
            input,
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

/// Error body of a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Uniform outbound result: `{ ok: true, data }` or `{ ok: false, error }`.
///
/// The `ok` flag is derived from the variant when serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    Success { data: Value },
    Failure { error: ErrorBody },
}

impl Serialize for CallResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("CallResult", 2)?;
        match self {
            CallResult::Success { data } => {
                envelope.serialize_field("ok", &true)?;
                envelope.serialize_field("data", data)?;
            }
            CallResult::Failure { error } => {
                envelope.serialize_field("ok", &false)?;
                envelope.serialize_field("error", error)?;
            }
        }
        envelope.end()
    }
}

impl CallResult {
    pub fn success(data: Value) -> Self {
        CallResult::Success { data }
    }

    pub fn failure(error: &ProcedureError) -> Self {
        CallResult::Failure {
            error: ErrorBody {
                kind: error.kind(),
                message: error.to_string(),
                field: error.field().map(str::to_string),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CallResult::Success { .. })
    }

    /// The data of a successful call.
    pub fn data(&self) -> Option<&Value> {
        match self {
            CallResult::Success { data } => Some(data),
            CallResult::Failure { .. } => None,
        }
    }

    /// The error kind of a failed call.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            CallResult::Success { .. } => None,
            CallResult::Failure { error } => Some(error.kind),
        }
    }
}

impl From<Result<Value, ProcedureError>> for CallResult {
    fn from(result: Result<Value, ProcedureError>) -> Self {
        match result {
            Ok(data) => CallResult::success(data),
            Err(e) => CallResult::failure(&e),
        }
    }
}

/// Routes calls to registered procedures.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ProcedureRegistry>,
    contexts: ContextBuilder,
}

impl Dispatcher {
    pub fn new(registry: Arc<ProcedureRegistry>, contexts: ContextBuilder) -> Self {
        Self { registry, contexts }
    }

    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    /// Resolves the caller's context and dispatches the call.
    pub async fn handle(&self, call: ProcedureCall) -> CallResult {
        let ctx = match self.contexts.build(call.session_token.as_deref()).await {
            Ok(ctx) => ctx,
            Err(e) => return CallResult::failure(&e),
        };
        self.dispatch(&call.procedure_name, call.input, &ctx).await.into()
    }

    /// Executes `name` with `input` under an already-built context.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no procedure has that name
    /// - `Unauthorized` if the procedure is protected and `ctx` is anonymous
    /// - `Validation` if the input does not match the declared shape
    /// - `Store` if a store fails while the handler runs
    pub async fn dispatch(
        &self,
        name: &str,
        input: Value,
        ctx: &CallContext,
    ) -> Result<Value, ProcedureError> {
        let Some(procedure) = self.registry.get(name) else {
            tracing::debug!(procedure = name, "Unknown procedure");
            return Err(ProcedureError::NotFound(name.to_string()));
        };

        if procedure.access() == AccessTier::Protected && !ctx.is_authenticated() {
            tracing::debug!(procedure = name, "Rejected anonymous call to protected procedure");
            return Err(ProcedureError::Unauthorized);
        }

        let started = Instant::now();
        let result = procedure.handler().invoke(input, ctx).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => tracing::debug!(procedure = name, elapsed_ms, "Procedure succeeded"),
            Err(ProcedureError::Store(detail)) => {
                tracing::error!(procedure = name, elapsed_ms, error = %detail, "Procedure failed")
            }
            Err(e) => tracing::info!(procedure = name, elapsed_ms, kind = %e.kind(), "Procedure failed"),
        }

        result
    }
}
