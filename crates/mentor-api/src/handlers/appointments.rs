//! Appointment handlers
//!
//! Booking, lifecycle actions and administrative deletion.

use axum::{
    extract::{Path, State},
    Json,
};
use mentor_service::dto::{AppointmentResponse, CreateAppointmentRequest};
use mentor_service::AppointmentService;

use crate::extractors::{AppointmentPath, Caller, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Request an appointment as the calling student
///
/// POST /appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> ApiResult<Created<Json<AppointmentResponse>>> {
    let draft = request.into_draft(caller.id())?;
    let appointment = AppointmentService::new(state.service_context())
        .create(draft)
        .await?;
    Ok(Created(Json(AppointmentResponse::from(&appointment))))
}

/// Get an appointment the caller takes part in
///
/// GET /appointments/{appointment_id}
pub async fn get_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment = AppointmentService::new(state.service_context())
        .get(path.appointment_id()?, caller.id())
        .await?;
    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// POST /appointments/{appointment_id}/confirm
pub async fn confirm_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment = AppointmentService::new(state.service_context())
        .confirm(path.appointment_id()?, caller.id())
        .await?;
    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// POST /appointments/{appointment_id}/decline
pub async fn decline_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment = AppointmentService::new(state.service_context())
        .decline(path.appointment_id()?, caller.id())
        .await?;
    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// POST /appointments/{appointment_id}/cancel
pub async fn cancel_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment = AppointmentService::new(state.service_context())
        .cancel(path.appointment_id()?, caller.id())
        .await?;
    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// POST /appointments/{appointment_id}/complete
pub async fn complete_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<Json<AppointmentResponse>> {
    let appointment = AppointmentService::new(state.service_context())
        .complete(path.appointment_id()?, caller.id())
        .await?;
    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// Hard delete, whatever the status
///
/// Only the student or mentor of the appointment may delete it.
///
/// DELETE /appointments/{appointment_id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<AppointmentPath>,
) -> ApiResult<NoContent> {
    AppointmentService::new(state.service_context())
        .delete(path.appointment_id()?, caller.id())
        .await?;
    Ok(NoContent)
}
