//! PostgreSQL implementation of AppointmentRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use mentor_core::entities::Appointment;
use mentor_core::error::DomainError;
use mentor_core::traits::{AppointmentRepository, RepoResult};
use mentor_core::value_objects::{AppointmentId, AppointmentStatus, Role, UserId};

use crate::mappers::AppointmentInsert;
use crate::models::AppointmentModel;

use super::error::{appointment_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of AppointmentRepository
///
/// Slot exclusivity rests on the partial unique index
/// `uq_appointments_mentor_slot_active`, so two racing inserts for one slot
/// cannot both commit even across processes.
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new PgAppointmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(rows: Vec<AppointmentModel>) -> RepoResult<Vec<Appointment>> {
        rows.into_iter().map(Appointment::try_from).collect()
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AppointmentId) -> RepoResult<Option<Appointment>> {
        let sql = format!("SELECT {} FROM appointments WHERE id = $1", AppointmentModel::COLUMNS);
        let result = sqlx::query_as::<_, AppointmentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Appointment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId, role: Role) -> RepoResult<Vec<Appointment>> {
        let column = match role {
            Role::Student => "student_id",
            Role::Mentor => "mentor_id",
        };
        let sql = format!(
            "SELECT {} FROM appointments WHERE {column} = $1 ORDER BY date, time",
            AppointmentModel::COLUMNS
        );
        let rows = sqlx::query_as::<_, AppointmentModel>(&sql)
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Self::decode(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_mentor_date(
        &self,
        mentor_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>> {
        let sql = format!(
            "SELECT {} FROM appointments WHERE mentor_id = $1 AND date = $2 ORDER BY time",
            AppointmentModel::COLUMNS
        );
        let rows = sqlx::query_as::<_, AppointmentModel>(&sql)
            .bind(mentor_id.into_inner())
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Self::decode(rows)
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn insert_if_slot_free(&self, appointment: &Appointment) -> RepoResult<()> {
        let insert = AppointmentInsert::new(appointment);

        sqlx::query(
            r"
            INSERT INTO appointments (
                id, student_id, mentor_id, date, time, duration_minutes, appointment_type,
                meeting_type, meeting_link, location, notes, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(insert.id)
        .bind(insert.student_id)
        .bind(insert.mentor_id)
        .bind(insert.date)
        .bind(insert.time)
        .bind(insert.duration_minutes)
        .bind(insert.appointment_type)
        .bind(insert.meeting_type)
        .bind(insert.meeting_link)
        .bind(insert.location)
        .bind(insert.notes)
        .bind(insert.status)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::SlotConflict {
                mentor_id: appointment.mentor_id,
                slot: appointment.slot,
                reason: "already booked",
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn update_status(
        &self,
        appointment: &Appointment,
        previous: AppointmentStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE appointments
            SET status = $2, updated_at = GREATEST(updated_at, $3)
            WHERE id = $1 AND status = $4
            ",
        )
        .bind(appointment.id.into_inner())
        .bind(appointment.status.as_str())
        .bind(appointment.updated_at)
        .bind(previous.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(appointment.id).await? {
                Some(_) => Err(DomainError::ConcurrentUpdate(appointment.id)),
                None => Err(appointment_not_found(appointment.id)),
            };
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AppointmentId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
