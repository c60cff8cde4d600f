//! Primary/secondary user directory
//!
//! Reads the primary (typically remote) directory first and falls back to the
//! secondary (typically local) one when the primary fails or has no answer.

use async_trait::async_trait;
use tracing::{debug, warn};

use mentor_core::entities::User;
use mentor_core::traits::{RepoResult, UserDirectory};
use mentor_core::value_objects::UserId;

/// Read-through directory with primary precedence
#[derive(Debug, Clone)]
pub struct FallbackUserDirectory<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackUserDirectory<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P, S> UserDirectory for FallbackUserDirectory<P, S>
where
    P: UserDirectory,
    S: UserDirectory,
{
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        match self.primary.find_by_id(id).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => debug!(user_id = %id, "User missing from primary directory"),
            Err(e) => warn!(user_id = %id, error = %e, "Primary directory failed, using fallback"),
        }
        self.secondary.find_by_id(id).await
    }

    async fn find_mentors(&self) -> RepoResult<Vec<User>> {
        match self.primary.find_mentors().await {
            Ok(mentors) if !mentors.is_empty() => return Ok(mentors),
            Ok(_) => debug!("Primary directory has no mentors"),
            Err(e) => warn!(error = %e, "Primary directory failed, using fallback"),
        }
        self.secondary.find_mentors().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryUserDirectory;
    use mentor_core::error::DomainError;
    use mentor_core::value_objects::Role;

    struct Broken;

    #[async_trait]
    impl UserDirectory for Broken {
        async fn find_by_id(&self, _id: UserId) -> RepoResult<Option<User>> {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        }

        async fn find_mentors(&self) -> RepoResult<Vec<User>> {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        }
    }

    fn mentor(first: &str) -> User {
        User::new(UserId::new_v4(), Role::Mentor, first, "Doe", "m@example.com")
    }

    #[tokio::test]
    async fn test_primary_wins_when_it_answers() {
        let shared = mentor("Primary");
        let mut shadow = shared.clone();
        shadow.first_name = "Secondary".to_string();

        let directory = FallbackUserDirectory::new(
            MemoryUserDirectory::from_users([shared.clone()]),
            MemoryUserDirectory::from_users([shadow]),
        );
        let found = directory.find_by_id(shared.id).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Primary");
    }

    #[tokio::test]
    async fn test_miss_and_error_fall_back() {
        let local = mentor("Local");
        let directory = FallbackUserDirectory::new(
            MemoryUserDirectory::new(),
            MemoryUserDirectory::from_users([local.clone()]),
        );
        assert!(directory.find_by_id(local.id).await.unwrap().is_some());
        assert_eq!(directory.find_mentors().await.unwrap().len(), 1);

        let directory =
            FallbackUserDirectory::new(Broken, MemoryUserDirectory::from_users([local.clone()]));
        assert_eq!(directory.find_by_id(local.id).await.unwrap(), Some(local));
        assert_eq!(directory.find_mentors().await.unwrap().len(), 1);
    }
}
