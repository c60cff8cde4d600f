//! User entity <-> model mapper

use mentor_core::entities::User;
use mentor_core::error::DomainError;
use mentor_core::value_objects::Role;
use uuid::Uuid;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model
            .role
            .parse()
            .map_err(|e| DomainError::DatabaseError(format!("user {}: {e}", model.id)))?;
        Ok(User {
            id: model.id.into(),
            role,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            bio: model.bio,
            specialty: model.specialty,
            created_at: model.created_at,
        })
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: Uuid,
    pub role: &'static str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub bio: Option<&'a str>,
    pub specialty: &'a [String],
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            role: user.role.as_str(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            bio: user.bio.as_deref(),
            specialty: &user.specialty,
        }
    }
}
