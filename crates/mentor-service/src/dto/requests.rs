//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only `Deserialize`.

use serde::Deserialize;
use validator::Validate;

use mentor_core::{BookingDraft, Meeting, MeetingType, Slot, UserId};

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Appointment Requests
// ============================================================================

/// Booking request sent by a student
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub mentor_id: UserId,

    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM`
    pub time: String,

    #[validate(length(min = 1, max = 100, message = "Appointment type must be 1-100 characters"))]
    pub appointment_type: String,

    pub meeting_type: MeetingType,

    #[validate(length(max = 500, message = "Meeting link must be at most 500 characters"))]
    pub meeting_link: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Turn the request into a draft for `student_id`
    ///
    /// A missing meeting detail is kept blank so draft validation reports it.
    pub fn into_draft(self, student_id: UserId) -> ServiceResult<BookingDraft> {
        let slot = Slot::parse(&self.date, &self.time)
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let meeting = Meeting::from_parts(
            self.meeting_type,
            self.meeting_link.as_deref(),
            self.location.as_deref(),
        )
        .unwrap_or_else(|| match self.meeting_type {
            MeetingType::Virtual => Meeting::virtual_link(""),
            MeetingType::Physical => Meeting::physical(""),
        });

        Ok(BookingDraft {
            student_id,
            mentor_id: self.mentor_id,
            slot,
            appointment_type: self.appointment_type,
            meeting,
            notes: self.notes,
        })
    }
}

/// Which of the caller's appointments to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentScope {
    #[default]
    All,
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListQuery {
    #[serde(default)]
    pub scope: AppointmentScope,
}

// ============================================================================
// Mentor Requests
// ============================================================================

/// Mentor directory filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorListQuery {
    /// Exact specialty, case-insensitive
    pub specialty: Option<String>,
    /// Free text over name and specialties
    pub q: Option<String>,
}

/// Slot board query
#[derive(Debug, Clone, Deserialize)]
pub struct SlotsQuery {
    /// `YYYY-MM-DD`
    pub date: String,
}
