//! Entity to model mappers
//!
//! Conversions between domain entities (mentor-core) and database models.
//! - `TryFrom<Model> for Entity`: rows carry enums as text, so decoding can fail
//! - `*Insert` structs: prepare entity data for database writes

mod appointment;
mod availability;
mod user;

pub use appointment::AppointmentInsert;
pub use availability::AvailabilityColumns;
pub use user::UserInsert;
