//! Test fixtures and response shapes

use chrono::{Duration, Local, NaiveDate};
use mentor_core::{User, UserId};
use mentor_db::seed::{demo_mentors, demo_students};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The users a test server knows about
#[derive(Debug, Clone)]
pub struct Cast {
    pub mentors: Vec<User>,
    pub students: Vec<User>,
}

impl Cast {
    pub fn demo() -> Self {
        Self {
            mentors: demo_mentors(),
            students: demo_students(),
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.mentors.iter().chain(&self.students).cloned().collect()
    }

    pub fn mentor(&self, index: usize) -> UserId {
        self.mentors[index].id
    }

    pub fn student(&self, index: usize) -> UserId {
        self.students[index].id
    }
}

/// Booking request body
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub mentor_id: String,
    pub date: String,
    pub time: String,
    pub appointment_type: String,
    pub meeting_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn virtual_session(mentor_id: UserId, slot: &SlotBody) -> Self {
        Self {
            mentor_id: mentor_id.to_string(),
            date: slot.date.clone(),
            time: slot.time.clone(),
            appointment_type: "Career advice".to_string(),
            meeting_type: "virtual".to_string(),
            meeting_link: Some("https://meet.example/session".to_string()),
            location: None,
            notes: Some("First session".to_string()),
        }
    }
}

/// A date safely in the past for any local timezone
pub fn last_week() -> String {
    (Local::now().date_naive() - Duration::days(7)).format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentorBody {
    pub id: String,
    pub full_name: String,
    pub specialty: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotBody {
    pub date: String,
    pub time: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityBody {
    pub mentor_id: String,
    pub slots: Vec<SlotBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotViewBody {
    pub time: String,
    pub booked: bool,
    pub past: bool,
    pub bookable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentBody {
    pub id: String,
    pub student_id: String,
    pub mentor_id: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub meeting_type: String,
    pub meeting_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsBody {
    pub upcoming: usize,
    pub pending: usize,
    pub completed: usize,
    pub counterparts: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}
