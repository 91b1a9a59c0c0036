//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use warden_common::AppError;
use warden_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the failure came from the document store
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::StoreUnavailable(_) | DomainError::Conflict { .. })
        )
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::NotFound { resource, id } => {
                AppError::Internal(anyhow::anyhow!("{resource} {id} not found"))
            }
            ServiceError::Validation(msg) => AppError::Domain(DomainError::ValidationError(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
