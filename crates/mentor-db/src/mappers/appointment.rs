//! Appointment entity <-> model mapper

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use mentor_core::entities::Appointment;
use mentor_core::error::DomainError;
use mentor_core::value_objects::{AppointmentStatus, Meeting, MeetingType, Slot};

use crate::models::AppointmentModel;

fn corrupt(id: Uuid, what: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("appointment {id}: {what}"))
}

/// Convert AppointmentModel to Appointment entity
impl TryFrom<AppointmentModel> for Appointment {
    type Error = DomainError;

    fn try_from(model: AppointmentModel) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = model.status.parse().map_err(|e| corrupt(model.id, e))?;
        let kind: MeetingType = model
            .meeting_type
            .parse()
            .map_err(|e| corrupt(model.id, e))?;
        let meeting = Meeting::from_parts(kind, model.meeting_link.as_deref(), model.location.as_deref())
            .ok_or_else(|| corrupt(model.id, format!("{kind} meeting without details")))?;
        let duration_minutes =
            u32::try_from(model.duration_minutes).map_err(|e| corrupt(model.id, e))?;

        Ok(Appointment {
            id: model.id.into(),
            student_id: model.student_id.into(),
            mentor_id: model.mentor_id.into(),
            slot: Slot::new(model.date, model.time),
            duration_minutes,
            appointment_type: model.appointment_type,
            meeting,
            notes: model.notes,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Appointment entity reference flattened into column values
pub struct AppointmentInsert<'a> {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub appointment_type: &'a str,
    pub meeting_type: &'static str,
    pub meeting_link: Option<&'a str>,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> AppointmentInsert<'a> {
    pub fn new(appointment: &'a Appointment) -> Self {
        Self {
            id: appointment.id.into_inner(),
            student_id: appointment.student_id.into_inner(),
            mentor_id: appointment.mentor_id.into_inner(),
            date: appointment.slot.date,
            time: appointment.slot.time,
            duration_minutes: i32::try_from(appointment.duration_minutes).unwrap_or(i32::MAX),
            appointment_type: &appointment.appointment_type,
            meeting_type: appointment.meeting.kind().as_str(),
            meeting_link: appointment.meeting.meeting_link(),
            location: appointment.meeting.location(),
            notes: appointment.notes.as_deref(),
            status: appointment.status.as_str(),
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}
