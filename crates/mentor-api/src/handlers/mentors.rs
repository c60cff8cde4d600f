//! Mentor handlers
//!
//! Directory, availability and the per-date slot board.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use mentor_core::AvailabilitySlot;
use mentor_service::dto::{AvailabilityResponse, MentorListQuery, MentorResponse, SlotView, SlotsQuery};
use mentor_service::{AvailabilityService, MentorService, SlotService};

use crate::extractors::{ApiQuery, Caller, MentorPath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List mentors
///
/// GET /mentors?specialty=&q=
pub async fn list_mentors(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<MentorListQuery>,
) -> ApiResult<Json<Vec<MentorResponse>>> {
    let mentors = MentorService::new(state.service_context()).list(&filter).await?;
    Ok(Json(mentors))
}

/// Get one mentor
///
/// GET /mentors/{mentor_id}
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(path): Path<MentorPath>,
) -> ApiResult<Json<MentorResponse>> {
    let mentor = MentorService::new(state.service_context())
        .get(path.mentor_id()?)
        .await?;
    Ok(Json(mentor))
}

/// Get a mentor's availability
///
/// GET /mentors/{mentor_id}/availability
pub async fn get_availability(
    State(state): State<AppState>,
    Path(path): Path<MentorPath>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let mentor_id = path.mentor_id()?;
    let slots = AvailabilityService::new(state.service_context())
        .get(mentor_id)
        .await?;
    Ok(Json(availability_response(&path.mentor_id, slots)))
}

/// Regenerate the caller's own availability
///
/// POST /mentors/{mentor_id}/availability/regenerate
pub async fn regenerate_availability(
    State(state): State<AppState>,
    caller: Caller,
    Path(path): Path<MentorPath>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let mentor_id = path.mentor_id()?;
    let slots = AvailabilityService::new(state.service_context())
        .regenerate(mentor_id, caller.id())
        .await?;
    Ok(Json(availability_response(&path.mentor_id, slots)))
}

/// Slot board for one date
///
/// GET /mentors/{mentor_id}/slots?date=YYYY-MM-DD
pub async fn get_slots(
    State(state): State<AppState>,
    Path(path): Path<MentorPath>,
    ApiQuery(query): ApiQuery<SlotsQuery>,
) -> ApiResult<Json<Vec<SlotView>>> {
    let mentor_id = path.mentor_id()?;
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| ApiError::invalid_query("date must be YYYY-MM-DD"))?;

    let board = SlotService::new(state.service_context())
        .slots_for_date(mentor_id, date)
        .await?;
    Ok(Json(board))
}

fn availability_response(mentor_id: &str, slots: Vec<AvailabilitySlot>) -> AvailabilityResponse {
    AvailabilityResponse {
        mentor_id: mentor_id.to_string(),
        slots,
    }
}
