//! In-memory implementation of AvailabilityRepository

use async_trait::async_trait;
use dashmap::DashMap;

use mentor_core::entities::AvailabilitySlot;
use mentor_core::traits::{AvailabilityRepository, RepoResult};
use mentor_core::value_objects::UserId;

/// Availability sets keyed by mentor
#[derive(Debug, Default)]
pub struct MemoryAvailabilityRepository {
    slots: DashMap<UserId, Vec<AvailabilitySlot>>,
}

impl MemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AvailabilityRepository for MemoryAvailabilityRepository {
    async fn load(&self, mentor_id: UserId) -> RepoResult<Vec<AvailabilitySlot>> {
        Ok(self
            .slots
            .get(&mentor_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn replace(&self, mentor_id: UserId, slots: &[AvailabilitySlot]) -> RepoResult<()> {
        let mut sorted = slots.to_vec();
        sorted.sort_by_key(AvailabilitySlot::slot);
        sorted.dedup_by_key(|s| s.slot());
        self.slots.insert(mentor_id, sorted);
        Ok(())
    }
}
