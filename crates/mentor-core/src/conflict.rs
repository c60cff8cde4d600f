//! Conflict resolver - decides whether a slot may be booked
//!
//! Pure function over already-loaded state. Callers re-run it at booking
//! time under the mentor's lock; a verdict from a client is never trusted.

use chrono::NaiveDateTime;

use crate::entities::{Appointment, AvailabilitySlot};
use crate::error::DomainError;
use crate::value_objects::{Slot, UserId};

/// Outcome of checking one slot, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCheck {
    Bookable,
    /// The mentor does not offer this slot
    NotOffered,
    /// The slot starts before now
    InPast,
    /// A non-cancelled appointment already holds the slot
    Booked,
}

impl SlotCheck {
    #[inline]
    pub fn is_bookable(self) -> bool {
        self == Self::Bookable
    }

    /// Turn a negative verdict into the matching domain error
    pub fn into_result(self, mentor_id: UserId, slot: Slot) -> Result<(), DomainError> {
        match self {
            Self::Bookable => Ok(()),
            Self::InPast => Err(DomainError::SlotPast(slot)),
            Self::NotOffered => Err(DomainError::SlotConflict {
                mentor_id,
                slot,
                reason: "not in the mentor's availability",
            }),
            Self::Booked => Err(DomainError::SlotConflict {
                mentor_id,
                slot,
                reason: "already booked",
            }),
        }
    }
}

/// Check `slot` for `mentor_id`.
///
/// `availability` is the mentor's current set; `appointments` may contain
/// anything, only the mentor's non-cancelled ones on that slot count.
pub fn check_slot(
    availability: &[AvailabilitySlot],
    appointments: &[Appointment],
    mentor_id: UserId,
    slot: Slot,
    now: NaiveDateTime,
) -> SlotCheck {
    if !availability.iter().any(|a| a.slot() == slot) {
        return SlotCheck::NotOffered;
    }
    if slot.is_past(now) {
        return SlotCheck::InPast;
    }
    if appointments.iter().any(|a| a.occupies(mentor_id, slot)) {
        return SlotCheck::Booked;
    }
    SlotCheck::Bookable
}
