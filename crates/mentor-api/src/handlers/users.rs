//! Caller-centric handlers
//!
//! The caller's own appointment lists and dashboard counters.

use axum::{extract::State, Json};
use mentor_core::AppointmentStats;
use mentor_service::dto::{AppointmentListQuery, AppointmentResponse};
use mentor_service::QueryService;

use crate::extractors::{ApiQuery, Caller};
use crate::response::ApiResult;
use crate::state::AppState;

/// List the caller's appointments
///
/// GET /users/@me/appointments?scope=all|upcoming|past
pub async fn my_appointments(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(query): ApiQuery<AppointmentListQuery>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let appointments = QueryService::new(state.service_context())
        .list(caller.id(), caller.role(), query.scope)
        .await?;
    Ok(Json(appointments.iter().map(AppointmentResponse::from).collect()))
}

/// Dashboard counters for the caller
///
/// GET /users/@me/stats
pub async fn my_stats(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<AppointmentStats>> {
    let stats = QueryService::new(state.service_context())
        .stats(caller.id(), caller.role())
        .await?;
    Ok(Json(stats))
}
