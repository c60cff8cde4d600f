//! Entity to DTO mappers

use mentor_core::{Appointment, User};

use super::responses::{AppointmentResponse, MentorResponse};

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.to_string(),
            student_id: appointment.student_id.to_string(),
            mentor_id: appointment.mentor_id.to_string(),
            date: appointment.slot.date,
            time: appointment.slot.time.format("%H:%M").to_string(),
            duration_minutes: appointment.duration_minutes,
            appointment_type: appointment.appointment_type.clone(),
            meeting: appointment.meeting.clone(),
            notes: appointment.notes.clone(),
            status: appointment.status,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self::from(&appointment)
    }
}

impl From<&User> for MentorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            specialty: user.specialty.clone(),
        }
    }
}

impl From<User> for MentorResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
