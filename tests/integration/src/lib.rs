//! Integration test utilities for the scheduling API
//!
//! Spawns the real router on an ephemeral port, backed by in-memory
//! storage and a known cast of users.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
