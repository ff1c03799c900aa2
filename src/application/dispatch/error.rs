//! Procedure error taxonomy.
//!
//! Every failure a caller can observe is one of four kinds. Errors from the
//! domain and the stores are converted here, at the dispatcher boundary, so
//! that the outbound envelope never carries anything else.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};

/// Error kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unauthorized,
    ValidationError,
    NotFound,
    StoreError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::StoreError => "STORE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Failure of a procedure call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureError {
    /// Protected procedure called without a resolvable identity.
    #[error("Authentication required")]
    Unauthorized,

    /// Input did not match the procedure's declared shape.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// No procedure is registered under the requested name.
    #[error("No procedure named '{0}'")]
    NotFound(String),

    /// A store was unreachable or returned malformed data.
    ///
    /// The detail is for logs; callers only see a generic message.
    #[error("Internal store error")]
    Store(String),
}

impl ProcedureError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProcedureError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a store error from any displayable failure.
    pub fn store(detail: impl fmt::Display) -> Self {
        ProcedureError::Store(detail.to_string())
    }

    /// The caller-visible kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcedureError::Unauthorized => ErrorKind::Unauthorized,
            ProcedureError::Validation { .. } => ErrorKind::ValidationError,
            ProcedureError::NotFound(_) => ErrorKind::NotFound,
            ProcedureError::Store(_) => ErrorKind::StoreError,
        }
    }

    /// The offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ProcedureError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ValidationError> for ProcedureError {
    fn from(err: ValidationError) -> Self {
        let message = match &err {
            ValidationError::Required { message, .. } => message.clone(),
            other => other.to_string(),
        };
        ProcedureError::validation(err.field(), message)
    }
}

impl From<DomainError> for ProcedureError {
    fn from(err: DomainError) -> Self {
        ProcedureError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_one_to_one() {
        assert_eq!(ProcedureError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            ProcedureError::validation("name", "Name is required").kind(),
            ErrorKind::ValidationError
        );
        assert_eq!(
            ProcedureError::NotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ProcedureError::store("down").kind(), ErrorKind::StoreError);
    }

    #[test]
    fn error_kind_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::ValidationError).unwrap(),
            "\"VALIDATION_ERROR\""
        );
        assert_eq!(ErrorKind::StoreError.to_string(), "STORE_ERROR");
    }

    #[test]
    fn store_error_hides_detail_in_display() {
        let err = ProcedureError::store("password authentication failed for user");
        assert_eq!(err.to_string(), "Internal store error");
    }

    #[test]
    fn required_validation_error_keeps_user_message() {
        let err: ProcedureError = ValidationError::required("name", "Name is required").into();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn database_domain_error_becomes_store_error() {
        let err: ProcedureError = DomainError::database("Failed to fetch agent", "timeout").into();
        assert_eq!(err.kind(), ErrorKind::StoreError);
    }

    #[test]
    fn malformed_record_becomes_store_error() {
        let domain: DomainError = ValidationError::empty_field("user_id").into();
        let err: ProcedureError = domain.into();
        assert_eq!(err.kind(), ErrorKind::StoreError);
        assert_eq!(err.field(), None);
    }
}
