//! Per-mentor serialization
//!
//! Booking runs check-then-insert and transitions run load-then-update.
//! Holding the mentor's lock across either keeps both steps one unit
//! within this process; the repository's own atomic insert covers the rest.

use std::sync::Arc;

use dashmap::DashMap;
use mentor_core::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per mentor, created on first use
#[derive(Debug, Default)]
pub struct MentorLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl MentorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the mentor's lock
    pub async fn acquire(&self, mentor_id: UserId) -> OwnedMutexGuard<()> {
        // Clone the Arc out so no map shard stays locked across the await
        let lock = Arc::clone(self.locks.entry(mentor_id).or_default().value());
        lock.lock_owned().await
    }

    /// Number of mentors that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
