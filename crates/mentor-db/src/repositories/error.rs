//! Error handling utilities for repositories

use mentor_core::error::DomainError;
use mentor_core::value_objects::AppointmentId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create an "appointment not found" error
pub fn appointment_not_found(id: AppointmentId) -> DomainError {
    DomainError::AppointmentNotFound(id)
}
