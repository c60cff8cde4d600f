//! Appointment service
//!
//! Booking and the appointment lifecycle. Every write holds the mentor's
//! lock from the first read to the final store call.

use tracing::{info, instrument, warn};

use mentor_core::conflict::check_slot;
use mentor_core::{
    Appointment, AppointmentId, BookingDraft, DomainError, LifecycleAction, Role, UserId,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lookup;

/// Appointment service
pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Request an appointment; the result is `pending`
    #[instrument(skip(self, draft), fields(mentor_id = %draft.mentor_id, slot = %draft.slot))]
    pub async fn create(&self, draft: BookingDraft) -> ServiceResult<Appointment> {
        draft.validate()?;

        let student = lookup::require_user(self.ctx, draft.student_id).await?;
        if student.role != Role::Student {
            return Err(ServiceError::permission_denied(
                "only students may request appointments",
            ));
        }
        lookup::require_mentor(self.ctx, draft.mentor_id).await?;

        let clock = self.ctx.clock();
        let (mentor_id, slot) = (draft.mentor_id, draft.slot);
        if slot.is_past(clock.local_now()) {
            return Err(DomainError::SlotPast(slot).into());
        }

        let _guard = self.ctx.mentor_locks().acquire(mentor_id).await;

        let availability = self.ctx.availability_repo().load(mentor_id).await?;
        let appointments = self
            .ctx
            .appointment_repo()
            .find_by_mentor_date(mentor_id, slot.date)
            .await?;
        check_slot(&availability, &appointments, mentor_id, slot, clock.local_now())
            .into_result(mentor_id, slot)?;

        let duration = availability
            .iter()
            .find(|a| a.slot() == slot)
            .map_or(self.ctx.availability_policy().rules().slot_minutes, |a| {
                a.duration_minutes
            });
        let appointment = Appointment::from_draft(AppointmentId::new_v4(), draft, duration, clock.now());
        self.ctx
            .appointment_repo()
            .insert_if_slot_free(&appointment)
            .await?;

        info!(
            appointment_id = %appointment.id,
            student_id = %appointment.student_id,
            "Appointment requested"
        );
        Ok(appointment)
    }

    /// Load an appointment the caller takes part in
    #[instrument(skip(self))]
    pub async fn get(&self, id: AppointmentId, caller: UserId) -> ServiceResult<Appointment> {
        let appointment = self.find(id).await?;
        if !appointment.involves(caller) {
            return Err(DomainError::NotAppointmentParticipant.into());
        }
        Ok(appointment)
    }

    /// Mentor accepts: `pending` to `confirmed`
    pub async fn confirm(&self, id: AppointmentId, caller: UserId) -> ServiceResult<Appointment> {
        self.transition(id, caller, LifecycleAction::Confirm).await
    }

    /// Mentor rejects: `pending` to `cancelled`
    pub async fn decline(&self, id: AppointmentId, caller: UserId) -> ServiceResult<Appointment> {
        self.transition(id, caller, LifecycleAction::Decline).await
    }

    /// Either party withdraws: `pending` or `confirmed` to `cancelled`
    pub async fn cancel(&self, id: AppointmentId, caller: UserId) -> ServiceResult<Appointment> {
        self.transition(id, caller, LifecycleAction::Cancel).await
    }

    /// Session held: to `completed` once the slot has elapsed
    pub async fn complete(&self, id: AppointmentId, caller: UserId) -> ServiceResult<Appointment> {
        self.transition(id, caller, LifecycleAction::Complete).await
    }

    /// Hard delete regardless of state, by one of the two participants
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AppointmentId, caller: UserId) -> ServiceResult<()> {
        self.get(id, caller).await?;
        if !self.ctx.appointment_repo().delete(id).await? {
            return Err(DomainError::AppointmentNotFound(id).into());
        }
        warn!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(action = %action))]
    async fn transition(
        &self,
        id: AppointmentId,
        caller: UserId,
        action: LifecycleAction,
    ) -> ServiceResult<Appointment> {
        let mentor_id = self.find(id).await?.mentor_id;
        let _guard = self.ctx.mentor_locks().acquire(mentor_id).await;

        // Reload under the lock so the transition sees the latest status
        let mut appointment = self.find(id).await?;
        let clock = self.ctx.clock();
        let at = clock.now();
        let previous = match action {
            LifecycleAction::Confirm => appointment.confirm(caller, at),
            LifecycleAction::Decline => appointment.decline(caller, at),
            LifecycleAction::Cancel => appointment.cancel(caller, at),
            LifecycleAction::Complete => appointment.complete(
                caller,
                clock.local_now(),
                self.ctx.completion_policy(),
                at,
            ),
        }?;

        match self
            .ctx
            .appointment_repo()
            .update_status(&appointment, previous)
            .await
        {
            Ok(()) => {}
            Err(DomainError::ConcurrentUpdate(_)) => {
                let current = self.find(id).await?;
                warn!(
                    appointment_id = %id,
                    status = %current.status,
                    "Lost a status update race"
                );
                return Err(DomainError::InvalidTransition {
                    from: current.status,
                    action,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            appointment_id = %id,
            from = %previous,
            to = %appointment.status,
            "Appointment status changed"
        );
        Ok(appointment)
    }

    async fn find(&self, id: AppointmentId) -> ServiceResult<Appointment> {
        self.ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::AppointmentNotFound(id).into())
    }
}
