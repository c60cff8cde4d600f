//! Database models
//!
//! Row structs mirroring the tables in `migrations/`, decoded with `FromRow`.

mod appointment;
mod availability;
mod user;

pub use appointment::AppointmentModel;
pub use availability::AvailabilitySlotModel;
pub use user::UserModel;
