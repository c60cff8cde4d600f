//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage adapters in
//! `mentor-db` provide the implementation. Each call is atomic on its own.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{Appointment, AvailabilitySlot, User};
use crate::error::DomainError;
use crate::value_objects::{AppointmentId, AppointmentStatus, Role, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Directory
// ============================================================================

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// List every user with the mentor role
    async fn find_mentors(&self) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Appointment Repository
// ============================================================================

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID
    async fn find_by_id(&self, id: AppointmentId) -> RepoResult<Option<Appointment>>;

    /// Appointments where `user_id` is the student (or the mentor, per `role`)
    async fn find_by_user(&self, user_id: UserId, role: Role) -> RepoResult<Vec<Appointment>>;

    /// All appointments of a mentor on one date, any status
    async fn find_by_mentor_date(
        &self,
        mentor_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>>;

    /// Insert unless a non-cancelled appointment already holds the same
    /// `(mentor_id, date, time)`. Fails with `SlotConflict` in that case.
    async fn insert_if_slot_free(&self, appointment: &Appointment) -> RepoResult<()>;

    /// Persist a status change, provided the stored status is still `previous`.
    /// Fails with `ConcurrentUpdate` otherwise.
    async fn update_status(
        &self,
        appointment: &Appointment,
        previous: AppointmentStatus,
    ) -> RepoResult<()>;

    /// Hard delete. Returns whether a row existed.
    async fn delete(&self, id: AppointmentId) -> RepoResult<bool>;
}

// ============================================================================
// Availability Repository
// ============================================================================

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// The mentor's current availability, sorted by slot
    async fn load(&self, mentor_id: UserId) -> RepoResult<Vec<AvailabilitySlot>>;

    /// Atomically replace the mentor's whole availability set
    async fn replace(&self, mentor_id: UserId, slots: &[AvailabilitySlot]) -> RepoResult<()>;
}
