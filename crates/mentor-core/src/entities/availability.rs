//! Availability slot - one bookable instant a mentor offers

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::value_objects::{hhmm, Slot};

/// A slot a mentor offers, with its session length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
}

impl AvailabilitySlot {
    pub const fn new(slot: Slot, duration_minutes: u32) -> Self {
        Self {
            date: slot.date,
            time: slot.time,
            duration_minutes,
        }
    }

    /// The `(date, time)` identity of this slot
    #[inline]
    pub const fn slot(&self) -> Slot {
        Slot::new(self.date, self.time)
    }
}
