//! In-memory implementation of UserDirectory

use async_trait::async_trait;
use dashmap::DashMap;

use mentor_core::entities::User;
use mentor_core::traits::{RepoResult, UserDirectory};
use mentor_core::value_objects::UserId;

/// User profiles keyed by id
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: DashMap<UserId, User>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Add or replace a profile
    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_mentors(&self) -> RepoResult<Vec<User>> {
        let mut mentors: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.is_mentor())
            .map(|entry| entry.value().clone())
            .collect();
        mentors.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(mentors)
    }
}
