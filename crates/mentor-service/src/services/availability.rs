//! Availability service
//!
//! Generates, stores and reads mentors' bookable slots.

use tracing::{info, instrument, warn};

use mentor_core::{AvailabilitySlot, UserId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lookup;

/// Availability service
pub struct AvailabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A mentor's current availability, sorted by slot
    #[instrument(skip(self))]
    pub async fn get(&self, mentor_id: UserId) -> ServiceResult<Vec<AvailabilitySlot>> {
        lookup::require_mentor(self.ctx, mentor_id).await?;
        Ok(self.ctx.availability_repo().load(mentor_id).await?)
    }

    /// Regenerate a mentor's availability, replacing the stored set
    ///
    /// Only the mentor may regenerate their own availability. Existing
    /// appointments are left alone.
    #[instrument(skip(self))]
    pub async fn regenerate(
        &self,
        mentor_id: UserId,
        caller: UserId,
    ) -> ServiceResult<Vec<AvailabilitySlot>> {
        if caller != mentor_id {
            return Err(ServiceError::permission_denied(
                "only the mentor may regenerate their availability",
            ));
        }
        lookup::require_mentor(self.ctx, mentor_id).await?;
        self.generate_for(mentor_id).await
    }

    /// Generate and store availability without a caller check
    pub async fn generate_for(&self, mentor_id: UserId) -> ServiceResult<Vec<AvailabilitySlot>> {
        let policy = self.ctx.availability_policy();
        let clock = self.ctx.clock();
        let now = clock.local_now();

        let generated = policy.generate(clock.today());
        let total = generated.len();
        let slots: Vec<AvailabilitySlot> = generated
            .into_iter()
            .filter(|slot| policy.rules().honours_contract(slot, now))
            .collect();
        if slots.len() < total {
            warn!(
                mentor_id = %mentor_id,
                dropped = total - slots.len(),
                "Policy produced slots outside the availability contract"
            );
        }

        self.ctx.availability_repo().replace(mentor_id, &slots).await?;

        info!(mentor_id = %mentor_id, slots = slots.len(), "Availability regenerated");
        Ok(slots)
    }
}
