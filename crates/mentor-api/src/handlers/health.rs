//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use mentor_common::StorageBackend;
use mentor_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (backend, healthy) = match state.config().storage.backend {
        StorageBackend::Memory => ("memory", true),
        StorageBackend::Postgres => {
            let healthy = match state.service_context().pool() {
                Some(pool) => pool.acquire().await.is_ok(),
                None => false,
            };
            ("postgres", healthy)
        }
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(backend, healthy)))
}
