//! Response DTOs for API endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use mentor_core::{AppointmentStatus, AvailabilitySlot, Meeting};

// ============================================================================
// Appointment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub student_id: String,
    pub mentor_id: String,
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    pub duration_minutes: u32,
    pub appointment_type: String,
    /// Flattened into `meeting_type` plus `meeting_link` or `location`
    #[serde(flatten)]
    pub meeting: Meeting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Mentor Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MentorResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub specialty: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub mentor_id: String,
    pub slots: Vec<AvailabilitySlot>,
}

/// One offered slot on a mentor's board for a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    pub duration_minutes: u32,
    /// Held by a non-cancelled appointment
    pub booked: bool,
    pub past: bool,
    pub bookable: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    /// `memory` or `postgres`
    pub backend: String,
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(backend: &str, storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                backend: backend.to_string(),
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
