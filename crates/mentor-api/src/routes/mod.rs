//! Route definitions
//!
//! API routes are mounted under /api/v1; health routes sit outside it.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{appointments, health, mentors, users};
use crate::state::AppState;

/// Create the main API router (health is exported separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(mentor_routes())
        .merge(appointment_routes())
        .merge(user_routes())
}

fn mentor_routes() -> Router<AppState> {
    Router::new()
        .route("/mentors", get(mentors::list_mentors))
        .route("/mentors/:mentor_id", get(mentors::get_mentor))
        .route("/mentors/:mentor_id/availability", get(mentors::get_availability))
        .route(
            "/mentors/:mentor_id/availability/regenerate",
            post(mentors::regenerate_availability),
        )
        .route("/mentors/:mentor_id/slots", get(mentors::get_slots))
}

fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", post(appointments::create_appointment))
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment).delete(appointments::delete_appointment),
        )
        .route(
            "/appointments/:appointment_id/confirm",
            post(appointments::confirm_appointment),
        )
        .route(
            "/appointments/:appointment_id/decline",
            post(appointments::decline_appointment),
        )
        .route(
            "/appointments/:appointment_id/cancel",
            post(appointments::cancel_appointment),
        )
        .route(
            "/appointments/:appointment_id/complete",
            post(appointments::complete_appointment),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/appointments", get(users::my_appointments))
        .route("/users/@me/stats", get(users::my_stats))
}
