//! User entity - a student or mentor profile, read-only to scheduling

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, UserId};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub specialty: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: UserId,
        role: Role,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            role,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            bio: None,
            specialty: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style specialty setter
    #[must_use]
    pub fn with_specialty<I, S>(mut self, specialty: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialty = specialty.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style bio setter
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[inline]
    pub fn is_mentor(&self) -> bool {
        self.role == Role::Mentor
    }

    /// Case-insensitive exact match against any specialty entry
    pub fn has_specialty(&self, specialty: &str) -> bool {
        let wanted = specialty.trim();
        self.specialty.iter().any(|s| s.eq_ignore_ascii_case(wanted))
    }

    /// Case-insensitive substring search over full name and specialties
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&needle)
            || self
                .specialty
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
    }
}
