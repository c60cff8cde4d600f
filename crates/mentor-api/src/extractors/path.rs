//! Path parameter extractors
//!
//! Ids arrive as strings and are parsed into typed ids here, so handlers
//! report a malformed id as a path error rather than a 404.

use mentor_core::{AppointmentId, UserId};
use serde::Deserialize;

use crate::response::ApiError;

/// Path parameters with mentor_id
#[derive(Debug, Deserialize)]
pub struct MentorPath {
    pub mentor_id: String,
}

impl MentorPath {
    pub fn mentor_id(&self) -> Result<UserId, ApiError> {
        UserId::parse(&self.mentor_id).map_err(|_| ApiError::invalid_path("Invalid mentor_id format"))
    }
}

/// Path parameters with appointment_id
#[derive(Debug, Deserialize)]
pub struct AppointmentPath {
    pub appointment_id: String,
}

impl AppointmentPath {
    pub fn appointment_id(&self) -> Result<AppointmentId, ApiError> {
        AppointmentId::parse(&self.appointment_id)
            .map_err(|_| ApiError::invalid_path("Invalid appointment_id format"))
    }
}
