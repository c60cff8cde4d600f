//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in mentor-core.

mod appointment;
mod availability;
mod error;
mod user;

pub use appointment::PgAppointmentRepository;
pub use availability::PgAvailabilityRepository;
pub use user::PgUserDirectory;
