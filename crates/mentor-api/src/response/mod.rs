//! Response types and error handling for API endpoints
//!
//! Every error renders as `{ "error": { code, message, details } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentor_common::{AppError, ErrorResponse};
use mentor_core::DomainError;
use mentor_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Failures of an HTTP request
///
/// Anything past request parsing arrives as an [`AppError`]; the other
/// variants cover what the extractors reject before a handler runs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing X-User-Id header")]
    MissingIdentity,

    #[error("Malformed X-User-Id header")]
    InvalidIdentity,

    #[error("Unknown caller")]
    UnknownCaller,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::App(err.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::App(err.into())
    }
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Validation(_)
            | Self::InvalidPath(_)
            | Self::InvalidQuery(_)
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MissingIdentity | Self::InvalidIdentity | Self::UnknownCaller => {
                StatusCode::UNAUTHORIZED
            }
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::UnknownCaller => "UNKNOWN_CALLER",
        }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::App(e) => ErrorResponse::from(e),
            Self::Validation(errors) => ErrorResponse {
                code: self.error_code().to_string(),
                message: "Request validation failed".to_string(),
                details: serde_json::to_value(errors).ok(),
            },
            _ => ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        }
        (status, Json(ErrorEnvelope { error: self.body() })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 201 with the wrapped body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

/// 204
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
