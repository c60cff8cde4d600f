//! Service context - dependency container for services
//!
//! Holds the repositories, the clock, the availability policy and the
//! per-mentor locks every service runs against.

use std::fmt;
use std::sync::Arc;

use mentor_core::traits::{AppointmentRepository, AvailabilityRepository, UserDirectory};
use mentor_core::{AvailabilityPolicy, Clock, CompletionPolicy, SystemClock, WeekdayRandomPolicy};
use mentor_db::PgPool;

use super::error::{ServiceError, ServiceResult};
use super::locks::MentorLocks;

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Present only with the PostgreSQL backend
    pool: Option<PgPool>,

    // Repositories
    user_directory: Arc<dyn UserDirectory>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,

    // Scheduling
    clock: Arc<dyn Clock>,
    availability_policy: Arc<dyn AvailabilityPolicy>,
    completion_policy: CompletionPolicy,
    mentor_locks: Arc<MentorLocks>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// PostgreSQL pool, when the context runs on that backend
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    pub fn availability_repo(&self) -> &dyn AvailabilityRepository {
        self.availability_repo.as_ref()
    }

    // === Scheduling ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn availability_policy(&self) -> &dyn AvailabilityPolicy {
        self.availability_policy.as_ref()
    }

    pub fn completion_policy(&self) -> CompletionPolicy {
        self.completion_policy
    }

    pub fn mentor_locks(&self) -> &MentorLocks {
        &self.mentor_locks
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.is_some())
            .field("user_directory", &"...")
            .field("appointment_repo", &"...")
            .field("availability_repo", &"...")
            .field("completion_policy", &self.completion_policy)
            .field("mentor_locks", &self.mentor_locks.len())
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
///
/// Repositories are required. The clock defaults to the UTC wall clock and
/// the availability policy to [`WeekdayRandomPolicy`] with default rules.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_directory: Option<Arc<dyn UserDirectory>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    availability_repo: Option<Arc<dyn AvailabilityRepository>>,
    clock: Option<Arc<dyn Clock>>,
    availability_policy: Option<Arc<dyn AvailabilityPolicy>>,
    completion_policy: CompletionPolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn availability_repo(mut self, repo: Arc<dyn AvailabilityRepository>) -> Self {
        self.availability_repo = Some(repo);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn availability_policy(mut self, policy: Arc<dyn AvailabilityPolicy>) -> Self {
        self.availability_policy = Some(policy);
        self
    }

    pub fn completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }

    /// Build the service context
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_directory: self
                .user_directory
                .ok_or_else(|| ServiceError::validation("user_directory is required"))?,
            appointment_repo: self
                .appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            availability_repo: self
                .availability_repo
                .ok_or_else(|| ServiceError::validation("availability_repo is required"))?,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::utc())),
            availability_policy: self
                .availability_policy
                .unwrap_or_else(|| Arc::new(WeekdayRandomPolicy::default())),
            completion_policy: self.completion_policy,
            mentor_locks: Arc::new(MentorLocks::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_db::{MemoryAppointmentRepository, MemoryAvailabilityRepository, MemoryUserDirectory};

    #[test]
    fn test_build_requires_repositories() {
        let err = ServiceContext::builder()
            .user_directory(Arc::new(MemoryUserDirectory::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("appointment_repo is required"));
    }

    #[test]
    fn test_build_with_defaults() {
        let ctx = ServiceContext::builder()
            .user_directory(Arc::new(MemoryUserDirectory::new()))
            .appointment_repo(Arc::new(MemoryAppointmentRepository::new()))
            .availability_repo(Arc::new(MemoryAvailabilityRepository::new()))
            .build()
            .unwrap();

        assert!(ctx.pool().is_none());
        assert_eq!(ctx.completion_policy(), CompletionPolicy::Lenient);
        assert_eq!(ctx.availability_policy().rules().horizon_days, 14);
        assert!(ctx.mentor_locks().is_empty());
    }
}
