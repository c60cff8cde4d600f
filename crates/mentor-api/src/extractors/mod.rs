//! Axum extractors for request handling
//!
//! Caller identity, validated bodies, typed path ids and query strings.

mod identity;
mod path;
mod query;
mod validated;

pub use identity::{Caller, XUserId};
pub use path::{AppointmentPath, MentorPath};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
