//! Procedure dispatch.
//!
//! - `procedure` - Typed procedure traits and access tiers
//! - `registry` - Startup-built, read-only name → procedure mapping
//! - `dispatcher` - Tier enforcement, execution, and the outbound envelope
//! - `error` - The four caller-visible error kinds

mod dispatcher;
mod error;
mod procedure;
mod registry;

pub use dispatcher::{CallResult, Dispatcher, ErrorBody, ProcedureCall};
pub use error::{ErrorKind, ProcedureError};
pub use procedure::{
    decode_input, AccessTier, EmptyInput, ErasedProcedure, ProcedureInput, ProtectedProcedure,
    PublicProcedure,
};
pub use registry::{
    ProcedureDescriptor, ProcedureRegistry, ProcedureRegistryBuilder, ProcedureSummary,
    RegistryError,
};
