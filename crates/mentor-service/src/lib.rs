//! # mentor-service
//!
//! Application layer: the scheduling use cases, their DTOs, and the
//! dependency container they run against.

pub mod dto;
pub mod services;

pub use services::{
    AppointmentService, AvailabilityService, MentorLocks, MentorService, QueryService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SlotService,
};
