//! Procedure traits and their type-erased form.
//!
//! A procedure is written against typed input and output. Two traits exist
//! because the access tier changes what the handler is given:
//!
//! - [`PublicProcedure`] receives the whole [`CallContext`], which may be anonymous
//! - [`ProtectedProcedure`] receives the proven [`Identity`] and cannot be
//!   reached without one
//!
//! The registry stores both behind [`ErasedProcedure`], which takes and
//! returns JSON values.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::context::CallContext;
use crate::domain::foundation::{Identity, ValidationError};

use super::ProcedureError;

/// Whether a procedure requires an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    Public,
    Protected,
}

/// Declared input shape of a procedure.
///
/// Decoding checks structure; `validate` checks semantics. Both run before
/// the handler body.
pub trait ProcedureInput: DeserializeOwned + Send + 'static {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Input of procedures that take no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmptyInput {}

impl ProcedureInput for EmptyInput {}

/// A procedure callable without authentication.
#[async_trait]
pub trait PublicProcedure: Send + Sync + 'static {
    type Input: ProcedureInput;
    type Output: Serialize + Send;

    async fn call(
        &self,
        input: Self::Input,
        ctx: &CallContext,
    ) -> Result<Self::Output, ProcedureError>;
}

/// A procedure that requires an authenticated caller.
#[async_trait]
pub trait ProtectedProcedure: Send + Sync + 'static {
    type Input: ProcedureInput;
    type Output: Serialize + Send;

    async fn call(
        &self,
        input: Self::Input,
        identity: &Identity,
    ) -> Result<Self::Output, ProcedureError>;
}

/// Type-erased procedure as stored in the registry.
#[async_trait]
pub trait ErasedProcedure: Send + Sync {
    async fn invoke(&self, input: Value, ctx: &CallContext) -> Result<Value, ProcedureError>;
}

pub(crate) struct PublicHandler<P>(pub(crate) P);

#[async_trait]
impl<P: PublicProcedure> ErasedProcedure for PublicHandler<P> {
    async fn invoke(&self, input: Value, ctx: &CallContext) -> Result<Value, ProcedureError> {
        let input = decode_input::<P::Input>(input)?;
        let output = self.0.call(input, ctx).await?;
        encode_output(&output)
    }
}

pub(crate) struct ProtectedHandler<P>(pub(crate) P);

#[async_trait]
impl<P: ProtectedProcedure> ErasedProcedure for ProtectedHandler<P> {
    async fn invoke(&self, input: Value, ctx: &CallContext) -> Result<Value, ProcedureError> {
        // Also enforced here for direct invocations
        let Some(identity) = ctx.identity() else {
            return Err(ProcedureError::Unauthorized);
        };
        let input = decode_input::<P::Input>(input)?;
        let output = self.0.call(input, identity).await?;
        encode_output(&output)
    }
}

/// Decodes and validates raw input. A missing body (`null`) decodes as `{}`.
pub fn decode_input<I: ProcedureInput>(input: Value) -> Result<I, ProcedureError> {
    let input = match input {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    let decoded: I = serde_json::from_value(input).map_err(|e| {
        let message = e.to_string();
        ProcedureError::validation(offending_field(&message), message)
    })?;

    decoded.validate()?;
    Ok(decoded)
}

fn encode_output<O: Serialize>(output: &O) -> Result<Value, ProcedureError> {
    serde_json::to_value(output)
        .map_err(|e| ProcedureError::store(format!("Failed to serialize result: {}", e)))
}

/// Extracts the field name serde reports as "missing field `x`" or
/// "unknown field `x`"; anything else is attributed to the whole input.
fn offending_field(message: &str) -> String {
    if !message.contains("field `") {
        return "input".to_string();
    }
    message
        .split('`')
        .nth(1)
        .filter(|field| !field.is_empty())
        .unwrap_or("input")
        .to_string()
}
