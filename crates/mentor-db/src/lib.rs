//! # mentor-db
//!
//! Storage layer implementing the repository traits of `mentor-core`.
//!
//! ## Overview
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - In-memory repositories for local runs and tests
//! - A primary/secondary fallback user directory
//! - Demo seed data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mentor_db::pool::{create_pool, run_migrations, PoolConfig};
//! use mentor_db::PgAppointmentRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let appointments = PgAppointmentRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod fallback;
pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod seed;

// Re-export commonly used types
pub use fallback::FallbackUserDirectory;
pub use memory::{MemoryAppointmentRepository, MemoryAvailabilityRepository, MemoryUserDirectory};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgAppointmentRepository, PgAvailabilityRepository, PgUserDirectory};
