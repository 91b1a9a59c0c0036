//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Document Errors
    // =========================================================================
    #[error("Failed to decode guild document: {0}")]
    Decode(String),

    #[error("Failed to encode guild document: {0}")]
    Encode(String),

    #[error("Unsupported document schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("Guild {guild_id} was modified concurrently; gave up after {attempts} attempts")]
    Conflict { guild_id: Snowflake, attempts: u32 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Document
            Self::Decode(_) => "DECODE_ERROR",
            Self::Encode(_) => "ENCODE_ERROR",
            Self::UnsupportedSchema { .. } => "UNSUPPORTED_SCHEMA",
            Self::Conflict { .. } => "CONFLICT",

            // Infrastructure
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Gateway(_) => "GATEWAY_ERROR",
        }
    }

    /// Check if the stored document could not be read back
    pub fn is_corrupt_document(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::UnsupportedSchema { .. })
    }
}
