//! Appointment entity - a booked session between a student and a mentor
//!
//! Lifecycle methods check the caller, then the current state, then any
//! time precondition, and only mutate once everything passed. A failed
//! transition leaves the entity exactly as it was.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{
    AppointmentId, AppointmentStatus, CompletionPolicy, LifecycleAction, Meeting, Slot, UserId,
};

/// Everything a student supplies when requesting an appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub student_id: UserId,
    pub mentor_id: UserId,
    pub slot: Slot,
    pub appointment_type: String,
    pub meeting: Meeting,
    pub notes: Option<String>,
}

impl BookingDraft {
    /// Check required fields
    ///
    /// Slot bookability is not checked here; it depends on stored state.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.appointment_type.trim().is_empty() {
            return Err(DomainError::validation("appointment type is required"));
        }
        if !self.meeting.is_complete() {
            let field = match self.meeting {
                Meeting::Virtual { .. } => "meeting link",
                Meeting::Physical { .. } => "location",
            };
            return Err(DomainError::validation(format!(
                "{field} is required for a {} meeting",
                self.meeting.kind()
            )));
        }
        if self.student_id == self.mentor_id {
            return Err(DomainError::validation("cannot book an appointment with yourself"));
        }
        Ok(())
    }
}

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub student_id: UserId,
    pub mentor_id: UserId,
    pub slot: Slot,
    pub duration_minutes: u32,
    pub appointment_type: String,
    pub meeting: Meeting,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a pending appointment from a validated draft
    pub fn from_draft(
        id: AppointmentId,
        draft: BookingDraft,
        duration_minutes: u32,
        at: DateTime<Utc>,
    ) -> Self {
        let notes = draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            id,
            student_id: draft.student_id,
            mentor_id: draft.mentor_id,
            slot: draft.slot,
            duration_minutes,
            appointment_type: draft.appointment_type.trim().to_string(),
            meeting: draft.meeting,
            notes,
            status: AppointmentStatus::Pending,
            created_at: at,
            updated_at: at,
        }
    }

    /// Whether this appointment holds its mentor's slot
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.occupies_slot()
    }

    /// Whether this appointment holds `slot` for `mentor_id`
    pub fn occupies(&self, mentor_id: UserId, slot: Slot) -> bool {
        self.is_active() && self.mentor_id == mentor_id && self.slot == slot
    }

    /// Whether `user_id` is the student or the mentor
    pub fn involves(&self, user_id: UserId) -> bool {
        self.student_id == user_id || self.mentor_id == user_id
    }

    /// Mentor accepts a pending request
    pub fn confirm(&mut self, caller: UserId, at: DateTime<Utc>) -> Result<AppointmentStatus, DomainError> {
        self.require_mentor(caller)?;
        self.transition(LifecycleAction::Confirm, CompletionPolicy::default(), at)
    }

    /// Mentor rejects a pending request
    pub fn decline(&mut self, caller: UserId, at: DateTime<Utc>) -> Result<AppointmentStatus, DomainError> {
        self.require_mentor(caller)?;
        self.transition(LifecycleAction::Decline, CompletionPolicy::default(), at)
    }

    /// Either participant withdraws
    pub fn cancel(&mut self, caller: UserId, at: DateTime<Utc>) -> Result<AppointmentStatus, DomainError> {
        if !self.involves(caller) {
            return Err(DomainError::NotAppointmentParticipant);
        }
        self.transition(LifecycleAction::Cancel, CompletionPolicy::default(), at)
    }

    /// Mark the session as held
    ///
    /// Strict completion is the mentor's call; otherwise either participant
    /// may do it. `now_local` is the current wall-clock time in the
    /// scheduling timezone.
    pub fn complete(
        &mut self,
        caller: UserId,
        now_local: NaiveDateTime,
        policy: CompletionPolicy,
        at: DateTime<Utc>,
    ) -> Result<AppointmentStatus, DomainError> {
        if policy == CompletionPolicy::Strict {
            self.require_mentor(caller)?;
        } else if !self.involves(caller) {
            return Err(DomainError::NotAppointmentParticipant);
        }
        let next = self.next_status(LifecycleAction::Complete, policy)?;
        if !self.slot.is_past(now_local) {
            return Err(DomainError::NotYetElapsed(self.slot));
        }
        Ok(self.commit(next, at))
    }

    fn require_mentor(&self, caller: UserId) -> Result<(), DomainError> {
        if caller == self.mentor_id {
            Ok(())
        } else {
            Err(DomainError::NotAppointmentMentor)
        }
    }

    fn next_status(
        &self,
        action: LifecycleAction,
        policy: CompletionPolicy,
    ) -> Result<AppointmentStatus, DomainError> {
        self.status
            .apply(action, policy)
            .ok_or(DomainError::InvalidTransition {
                from: self.status,
                action,
            })
    }

    fn transition(
        &mut self,
        action: LifecycleAction,
        policy: CompletionPolicy,
        at: DateTime<Utc>,
    ) -> Result<AppointmentStatus, DomainError> {
        let next = self.next_status(action, policy)?;
        Ok(self.commit(next, at))
    }

    /// Apply `next` and return the status it replaced
    fn commit(&mut self, next: AppointmentStatus, at: DateTime<Utc>) -> AppointmentStatus {
        let previous = self.status;
        self.status = next;
        self.updated_at = self.updated_at.max(at);
        previous
    }
}
