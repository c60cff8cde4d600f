//! Service layer error types

use mentor_common::AppError;
use mentor_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The caller may not act on this resource
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Request input that never reached the domain
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied(reason.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => AppError::kind_status(e.kind()),
            Self::PermissionDenied(_) => 403,
            Self::Validation(_) => 400,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => Self::Domain(e),
            ServiceError::PermissionDenied(reason) => Self::PermissionDenied(reason),
            ServiceError::Validation(msg) => Self::Validation(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
