//! Value objects - immutable types that represent scheduling concepts

mod ids;
mod meeting;
mod role;
mod slot;
mod status;

pub use ids::{AppointmentId, IdParseError, UserId};
pub use meeting::{Meeting, MeetingType};
pub use role::Role;
pub use slot::{hhmm, parse_time, Slot, SlotParseError};
pub use status::{AppointmentStatus, CompletionPolicy, LifecycleAction};
