//! Directory lookups shared by the services

use mentor_core::{DomainError, User, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Load a user or fail with `UserNotFound`
pub(super) async fn require_user(ctx: &ServiceContext, user_id: UserId) -> ServiceResult<User> {
    ctx.user_directory()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user_id).into())
}

/// Load a user and check they are a mentor
pub(super) async fn require_mentor(ctx: &ServiceContext, mentor_id: UserId) -> ServiceResult<User> {
    let user = require_user(ctx, mentor_id).await?;
    if !user.is_mentor() {
        return Err(DomainError::NotAMentor(mentor_id).into());
    }
    Ok(user)
}
