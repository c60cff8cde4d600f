//! Domain errors - error types for the scheduling domain

use thiserror::Error;

use crate::value_objects::{AppointmentId, AppointmentStatus, LifecycleAction, Slot, UserId};

/// Broad class of a [`DomainError`], for callers that map errors onto a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    /// The request can never succeed as stated
    Invalid,
    Forbidden,
    /// The request clashes with current state
    Conflict,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The id exists but belongs to a student
    #[error("User {0} is not a mentor")]
    NotAMentor(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot book appointments in the past: {0}")]
    SlotPast(Slot),

    #[error("Appointment at {0} has not taken place yet")]
    NotYetElapsed(Slot),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the appointment's mentor may do this")]
    NotAppointmentMentor,

    #[error("Only the appointment's mentor or student may do this")]
    NotAppointmentParticipant,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slot {slot} of mentor {mentor_id} is not available: {reason}")]
    SlotConflict {
        mentor_id: UserId,
        slot: Slot,
        reason: &'static str,
    },

    #[error("Cannot {action} an appointment that is {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        action: LifecycleAction,
    },

    #[error("Appointment {0} was modified concurrently")]
    ConcurrentUpdate(AppointmentId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NotAMentor(_) => "NOT_A_MENTOR",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::SlotPast(_) => "SLOT_PAST",
            Self::NotYetElapsed(_) => "NOT_YET_ELAPSED",

            // Authorization
            Self::NotAppointmentMentor => "NOT_APPOINTMENT_MENTOR",
            Self::NotAppointmentParticipant => "NOT_APPOINTMENT_PARTICIPANT",

            // Conflict
            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ConcurrentUpdate(_) => "CONCURRENT_UPDATE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Which class of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AppointmentNotFound(_) | Self::UserNotFound(_) | Self::NotAMentor(_) => {
                ErrorKind::NotFound
            }
            Self::ValidationError(_) | Self::SlotPast(_) | Self::NotYetElapsed(_) => {
                ErrorKind::Invalid
            }
            Self::NotAppointmentMentor | Self::NotAppointmentParticipant => ErrorKind::Forbidden,
            Self::SlotConflict { .. }
            | Self::InvalidTransition { .. }
            | Self::ConcurrentUpdate(_) => ErrorKind::Conflict,
            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Invalid
    }

    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
