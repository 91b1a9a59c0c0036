//! Command error types

use thiserror::Error;
use warden_core::DomainError;
use warden_service::ServiceError;

/// Command error type
#[derive(Debug, Error)]
pub enum CommandError {
    /// Service error (store failures, conflicts)
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Domain error (gateway sends)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl CommandError {
    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
        }
    }
}

/// Command result type
pub type CommandResult = Result<(), CommandError>;
