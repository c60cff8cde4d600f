//! In-memory repositories
//!
//! Process-local implementations of the mentor-core ports, used by the
//! `memory` storage backend and by tests. Every method completes under a
//! single lock acquisition, which makes each call atomic.

mod appointment;
mod availability;
mod user;

pub use appointment::MemoryAppointmentRepository;
pub use availability::MemoryAvailabilityRepository;
pub use user::MemoryUserDirectory;
