//! Appointment database model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the appointments table
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub appointment_type: String,
    pub meeting_type: String,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AppointmentModel {
    /// Column list shared by every SELECT
    pub const COLUMNS: &'static str = "id, student_id, mentor_id, date, time, duration_minutes, \
        appointment_type, meeting_type, meeting_link, location, notes, status, created_at, updated_at";
}
