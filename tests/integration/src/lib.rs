//! Integration test utilities for the warden bot
//!
//! This crate provides helpers for running end-to-end scenarios through the
//! event router, the line-delimited gateway and a document store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
