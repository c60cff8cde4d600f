//! Role a user plays in the scheduling domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UserId;
use crate::entities::Appointment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
        }
    }

    /// The party of `appointment` that plays this role
    pub fn party_of(&self, appointment: &Appointment) -> UserId {
        match self {
            Self::Student => appointment.student_id,
            Self::Mentor => appointment.mentor_id,
        }
    }

    /// The other party of `appointment`
    pub fn counterpart_of(&self, appointment: &Appointment) -> UserId {
        match self {
            Self::Student => appointment.mentor_id,
            Self::Mentor => appointment.student_id,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "mentor" => Ok(Self::Mentor),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}
