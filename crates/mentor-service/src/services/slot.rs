//! Slot service
//!
//! Loads a mentor's availability and appointments and runs the conflict
//! resolver over them.

use chrono::NaiveDate;
use tracing::instrument;

use mentor_core::conflict::check_slot;
use mentor_core::{Slot, SlotCheck, UserId};

use crate::dto::SlotView;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup;

/// Slot service
pub struct SlotService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SlotService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether `slot` can be booked with `mentor_id` right now
    #[instrument(skip(self))]
    pub async fn is_slot_bookable(&self, mentor_id: UserId, slot: Slot) -> ServiceResult<bool> {
        Ok(self.check(mentor_id, slot).await?.is_bookable())
    }

    /// Verdict for one slot, with the reason when unbookable
    pub async fn check(&self, mentor_id: UserId, slot: Slot) -> ServiceResult<SlotCheck> {
        let availability = self.ctx.availability_repo().load(mentor_id).await?;
        let appointments = self
            .ctx
            .appointment_repo()
            .find_by_mentor_date(mentor_id, slot.date)
            .await?;
        Ok(check_slot(
            &availability,
            &appointments,
            mentor_id,
            slot,
            self.ctx.clock().local_now(),
        ))
    }

    /// Every slot the mentor offers on `date`, sorted by time
    #[instrument(skip(self))]
    pub async fn slots_for_date(
        &self,
        mentor_id: UserId,
        date: NaiveDate,
    ) -> ServiceResult<Vec<SlotView>> {
        lookup::require_mentor(self.ctx, mentor_id).await?;

        let availability = self.ctx.availability_repo().load(mentor_id).await?;
        let appointments = self
            .ctx
            .appointment_repo()
            .find_by_mentor_date(mentor_id, date)
            .await?;
        let now = self.ctx.clock().local_now();

        let mut views: Vec<SlotView> = availability
            .iter()
            .filter(|a| a.date == date)
            .map(|a| {
                let slot = a.slot();
                let verdict = check_slot(&availability, &appointments, mentor_id, slot, now);
                SlotView {
                    date: slot.date,
                    time: slot.time.format("%H:%M").to_string(),
                    duration_minutes: a.duration_minutes,
                    booked: appointments.iter().any(|x| x.occupies(mentor_id, slot)),
                    past: slot.is_past(now),
                    bookable: verdict.is_bookable(),
                }
            })
            .collect();
        views.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(views)
    }
}
