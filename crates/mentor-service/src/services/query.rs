//! Query service
//!
//! A user's appointments split by time, plus dashboard counters.

use tracing::instrument;

use mentor_core::query;
use mentor_core::{Appointment, AppointmentStats, Role, UserId};

use crate::dto::AppointmentScope;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup;

/// Query service
pub struct QueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QueryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Role of `user_id` according to the directory
    pub async fn resolve_role(&self, user_id: UserId) -> ServiceResult<Role> {
        Ok(lookup::require_user(self.ctx, user_id).await?.role)
    }

    /// Appointments where the user is the student or the mentor, per `role`
    #[instrument(skip(self))]
    pub async fn appointments_for_user(
        &self,
        user_id: UserId,
        role: Role,
    ) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.ctx.appointment_repo().find_by_user(user_id, role).await?;
        Ok(query::for_user(appointments, user_id, role))
    }

    /// Not cancelled and not yet started, earliest first
    #[instrument(skip(self))]
    pub async fn upcoming(&self, user_id: UserId, role: Role) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.appointments_for_user(user_id, role).await?;
        Ok(query::upcoming(appointments, self.ctx.clock().local_now()))
    }

    /// Started already or completed, latest first
    #[instrument(skip(self))]
    pub async fn past(&self, user_id: UserId, role: Role) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.appointments_for_user(user_id, role).await?;
        Ok(query::past(appointments, self.ctx.clock().local_now()))
    }

    /// Dispatch on a list scope
    pub async fn list(
        &self,
        user_id: UserId,
        role: Role,
        scope: AppointmentScope,
    ) -> ServiceResult<Vec<Appointment>> {
        match scope {
            AppointmentScope::All => self.appointments_for_user(user_id, role).await,
            AppointmentScope::Upcoming => self.upcoming(user_id, role).await,
            AppointmentScope::Past => self.past(user_id, role).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, user_id: UserId, role: Role) -> ServiceResult<AppointmentStats> {
        let appointments = self.appointments_for_user(user_id, role).await?;
        Ok(query::stats(&appointments, role, self.ctx.clock().local_now()))
    }
}
