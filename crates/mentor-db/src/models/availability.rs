//! Availability slot database model

use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

/// Database model for the availability_slots table
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilitySlotModel {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
}
