//! Procedure registry.
//!
//! The registry is assembled once at startup and is read-only afterwards. It
//! keeps registration order so that listings are stable.
//!
//! # Example
//!
//! ```ignore
//! let registry = ProcedureRegistry::builder()
//!     .public("auth.getSession", GetSessionHandler::new())
//!     .protected("agents.getMany", ListAgentsHandler::new(reader.clone()))
//!     .build()?;
//!
//! assert_eq!(registry.len(), 2);
//! ```

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::procedure::{ProtectedHandler, PublicHandler};
use super::{AccessTier, ErasedProcedure, ProtectedProcedure, PublicProcedure};

/// Errors raised while assembling the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Procedure '{0}' registered more than once")]
    Duplicate(String),

    #[error("Procedure name cannot be empty")]
    EmptyName,
}

/// A registered procedure.
pub struct ProcedureDescriptor {
    name: String,
    access: AccessTier,
    handler: Box<dyn ErasedProcedure>,
}

impl ProcedureDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(&self) -> AccessTier {
        self.access
    }

    pub fn handler(&self) -> &dyn ErasedProcedure {
        self.handler.as_ref()
    }

    pub fn summary(&self) -> ProcedureSummary {
        ProcedureSummary {
            name: self.name.clone(),
            access: self.access,
        }
    }
}

impl std::fmt::Debug for ProcedureDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcedureDescriptor")
            .field("name", &self.name)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

/// Public listing entry for a procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureSummary {
    pub name: String,
    pub access: AccessTier,
}

/// Ordered, read-only mapping from name to descriptor.
#[derive(Debug, Default)]
pub struct ProcedureRegistry {
    procedures: Vec<ProcedureDescriptor>,
    index: HashMap<String, usize>,
}

impl ProcedureRegistry {
    pub fn builder() -> ProcedureRegistryBuilder {
        ProcedureRegistryBuilder::default()
    }

    /// Gets a procedure by name.
    pub fn get(&self, name: &str) -> Option<&ProcedureDescriptor> {
        self.index.get(name).map(|&i| &self.procedures[i])
    }

    /// Iterates procedures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcedureDescriptor> {
        self.procedures.iter()
    }

    /// Summaries of all procedures in registration order.
    pub fn summaries(&self) -> Vec<ProcedureSummary> {
        self.iter().map(ProcedureDescriptor::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

/// Builder that collects procedures and rejects duplicate names on `build`.
#[derive(Default)]
pub struct ProcedureRegistryBuilder {
    procedures: Vec<ProcedureDescriptor>,
}

impl ProcedureRegistryBuilder {
    /// Registers a procedure callable without authentication.
    pub fn public<P: PublicProcedure>(self, name: impl Into<String>, procedure: P) -> Self {
        self.push(name.into(), AccessTier::Public, Box::new(PublicHandler(procedure)))
    }

    /// Registers a procedure that requires an authenticated caller.
    pub fn protected<P: ProtectedProcedure>(self, name: impl Into<String>, procedure: P) -> Self {
        self.push(
            name.into(),
            AccessTier::Protected,
            Box::new(ProtectedHandler(procedure)),
        )
    }

    fn push(mut self, name: String, access: AccessTier, handler: Box<dyn ErasedProcedure>) -> Self {
        self.procedures.push(ProcedureDescriptor {
            name,
            access,
            handler,
        });
        self
    }

    /// Finalizes the registry.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if two procedures share a name
    /// - `EmptyName` if a name is blank
    pub fn build(self) -> Result<ProcedureRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.procedures.len());
        for (i, descriptor) in self.procedures.iter().enumerate() {
            if descriptor.name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if index.insert(descriptor.name.clone(), i).is_some() {
                return Err(RegistryError::Duplicate(descriptor.name.clone()));
            }
        }

        Ok(ProcedureRegistry {
            procedures: self.procedures,
            index,
        })
    }
}
