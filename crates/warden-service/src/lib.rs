//! # warden-service
//!
//! Application layer: the record mutator that applies changes to guild documents,
//! and the handlers for guild and member lifecycle events.

pub mod services;

pub use services::{
    format_greeting, LifecycleService, MutationOutcome, RecordMutator, RegisterOutcome,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
