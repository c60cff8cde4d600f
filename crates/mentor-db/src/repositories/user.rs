//! PostgreSQL implementation of UserDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use mentor_core::entities::User;
use mentor_core::traits::{RepoResult, UserDirectory};
use mentor_core::value_objects::UserId;

use crate::mappers::UserInsert;
use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserDirectory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Create a new PgUserDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or refresh a profile
    ///
    /// Profiles are owned elsewhere; this exists for seeding and tests.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn upsert(&self, user: &User) -> RepoResult<()> {
        let insert = UserInsert::new(user);
        sqlx::query(
            r"
            INSERT INTO users (id, role, first_name, last_name, email, bio, specialty, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET role = EXCLUDED.role, first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name, email = EXCLUDED.email,
                bio = EXCLUDED.bio, specialty = EXCLUDED.specialty
            ",
        )
        .bind(insert.id)
        .bind(insert.role)
        .bind(insert.first_name)
        .bind(insert.last_name)
        .bind(insert.email)
        .bind(insert.bio)
        .bind(insert.specialty)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, role, first_name, last_name, email, bio, specialty, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_mentors(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, role, first_name, last_name, email, bio, specialty, created_at
            FROM users
            WHERE role = 'mentor'
            ORDER BY last_name, first_name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }
}
