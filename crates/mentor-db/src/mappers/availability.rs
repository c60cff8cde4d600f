//! Availability slot entity <-> model mapper

use chrono::{NaiveDate, NaiveTime};

use mentor_core::entities::AvailabilitySlot;
use mentor_core::value_objects::Slot;

use crate::models::AvailabilitySlotModel;

/// Convert AvailabilitySlotModel to AvailabilitySlot entity
impl From<AvailabilitySlotModel> for AvailabilitySlot {
    fn from(model: AvailabilitySlotModel) -> Self {
        AvailabilitySlot::new(
            Slot::new(model.date, model.time),
            u32::try_from(model.duration_minutes).unwrap_or_default(),
        )
    }
}

/// A slot set split into parallel columns for a single `UNNEST` insert
#[derive(Debug, Default)]
pub struct AvailabilityColumns {
    pub dates: Vec<NaiveDate>,
    pub times: Vec<NaiveTime>,
    pub durations: Vec<i32>,
}

impl AvailabilityColumns {
    pub fn new(slots: &[AvailabilitySlot]) -> Self {
        let mut columns = Self {
            dates: Vec::with_capacity(slots.len()),
            times: Vec::with_capacity(slots.len()),
            durations: Vec::with_capacity(slots.len()),
        };
        for slot in slots {
            columns.dates.push(slot.date);
            columns.times.push(slot.time);
            columns
                .durations
                .push(i32::try_from(slot.duration_minutes).unwrap_or(i32::MAX));
        }
        columns
    }
}
