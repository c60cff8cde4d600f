//! Mentor service
//!
//! Read-only access to the mentor directory.

use tracing::instrument;

use mentor_core::{User, UserId};

use crate::dto::{MentorListQuery, MentorResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup;

/// Mentor service
pub struct MentorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MentorService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mentors matching the filter, by last then first name
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &MentorListQuery) -> ServiceResult<Vec<MentorResponse>> {
        let specialty = filter.specialty.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let query = filter.q.as_deref().map(str::trim).unwrap_or_default();

        let mut mentors: Vec<User> = self
            .ctx
            .user_directory()
            .find_mentors()
            .await?
            .into_iter()
            .filter(|m| specialty.is_none_or(|s| m.has_specialty(s)))
            .filter(|m| m.matches_query(query))
            .collect();
        mentors.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str()).cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });

        Ok(mentors.iter().map(MentorResponse::from).collect())
    }

    /// One mentor's profile
    #[instrument(skip(self))]
    pub async fn get(&self, mentor_id: UserId) -> ServiceResult<MentorResponse> {
        let mentor = lookup::require_mentor(self.ctx, mentor_id).await?;
        Ok(MentorResponse::from(&mentor))
    }
}
