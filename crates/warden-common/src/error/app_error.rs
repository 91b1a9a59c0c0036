//! Application error types
//!
//! Unified error type for startup and the process edge.

use std::fmt;

use warden_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    // Gateway errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Store(_) => "STORE_ERROR",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether the process cannot continue after this error
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Config(_) | Self::Store(_) | Self::Internal(_) => true,
            Self::Gateway(_) => false,
            Self::Domain(e) => matches!(e, DomainError::StoreUnavailable(_)),
        }
    }

    /// Create a store error
    #[must_use]
    pub fn store(msg: impl fmt::Display) -> Self {
        Self::Store(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
