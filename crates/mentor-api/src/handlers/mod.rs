//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod appointments;
pub mod health;
pub mod mentors;
pub mod users;
