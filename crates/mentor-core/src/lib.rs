//! # mentor-core
//!
//! Domain layer of the mentor scheduling core: entities, value objects, the
//! appointment state machine, slot/conflict rules, query rules and the
//! repository traits (ports) that storage adapters implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod availability;
pub mod conflict;
pub mod entities;
pub mod error;
pub mod query;
pub mod time;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use availability::{AvailabilityPolicy, AvailabilityRules, WeekdayRandomPolicy};
pub use conflict::{check_slot, SlotCheck};
pub use entities::{Appointment, AvailabilitySlot, BookingDraft, User};
pub use error::{DomainError, ErrorKind};
pub use query::AppointmentStats;
pub use time::{Clock, FixedClock, SystemClock};
pub use traits::{AppointmentRepository, AvailabilityRepository, RepoResult, UserDirectory};
pub use value_objects::{
    AppointmentId, AppointmentStatus, CompletionPolicy, IdParseError, LifecycleAction, Meeting,
    MeetingType, Role, Slot, SlotParseError, UserId,
};
