//! PostgreSQL implementation of AvailabilityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use mentor_core::entities::AvailabilitySlot;
use mentor_core::traits::{AvailabilityRepository, RepoResult};
use mentor_core::value_objects::UserId;

use crate::mappers::AvailabilityColumns;
use crate::models::AvailabilitySlotModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AvailabilityRepository
#[derive(Clone)]
pub struct PgAvailabilityRepository {
    pool: PgPool,
}

impl PgAvailabilityRepository {
    /// Create a new PgAvailabilityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PgAvailabilityRepository {
    #[instrument(skip(self))]
    async fn load(&self, mentor_id: UserId) -> RepoResult<Vec<AvailabilitySlot>> {
        let rows = sqlx::query_as::<_, AvailabilitySlotModel>(
            r"
            SELECT date, time, duration_minutes
            FROM availability_slots
            WHERE mentor_id = $1
            ORDER BY date, time
            ",
        )
        .bind(mentor_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AvailabilitySlot::from).collect())
    }

    #[instrument(skip(self, slots), fields(count = slots.len()))]
    async fn replace(&self, mentor_id: UserId, slots: &[AvailabilitySlot]) -> RepoResult<()> {
        let columns = AvailabilityColumns::new(slots);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM availability_slots WHERE mentor_id = $1")
            .bind(mentor_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO availability_slots (mentor_id, date, time, duration_minutes)
            SELECT $1, d, t, m FROM UNNEST($2::date[], $3::time[], $4::int[]) AS s(d, t, m)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(mentor_id.into_inner())
        .bind(&columns.dates)
        .bind(&columns.times)
        .bind(&columns.durations)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
