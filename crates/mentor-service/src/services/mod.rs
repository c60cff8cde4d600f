//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] and orchestrates domain
//! rules from mentor-core against the repositories.

pub mod appointment;
pub mod availability;
pub mod context;
pub mod error;
pub mod locks;
mod lookup;
pub mod mentor;
pub mod query;
pub mod slot;

// Re-export all services for convenience
pub use appointment::AppointmentService;
pub use availability::AvailabilityService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use locks::MentorLocks;
pub use mentor::MentorService;
pub use query::QueryService;
pub use slot::SlotService;
