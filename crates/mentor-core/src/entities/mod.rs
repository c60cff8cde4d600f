//! Domain entities - core scheduling records

mod appointment;
mod availability;
mod user;

pub use appointment::{Appointment, BookingDraft};
pub use availability::AvailabilitySlot;
pub use user::User;
