//! Business logic services
//!
//! Record mutation and guild lifecycle handling on top of the document store.

pub mod context;
pub mod error;
pub mod lifecycle;
pub mod mutator;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::{format_greeting, LifecycleService};
pub use mutator::{MutationOutcome, RecordMutator, RegisterOutcome};
