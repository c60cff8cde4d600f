//! Server setup and initialization
//!
//! Builds the storage backend named in the config, seeds it when asked,
//! and serves the router.

use std::sync::Arc;

use axum::Router;
use mentor_common::{AppConfig, AppError, DatabaseConfig, StorageBackend};
use mentor_core::traits::UserDirectory;
use mentor_core::{AvailabilityPolicy, Clock, SystemClock, WeekdayRandomPolicy};
use mentor_db::seed::{demo_users, seed_directory};
use mentor_db::{
    create_pool, run_migrations, FallbackUserDirectory, MemoryAppointmentRepository,
    MemoryAvailabilityRepository, MemoryUserDirectory, PgAppointmentRepository,
    PgAvailabilityRepository, PgUserDirectory, PoolConfig,
};
use mentor_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_observability};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a config error when the middleware settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_observability(health_routes());

    Ok(health.merge(api).with_state(state))
}

/// Initialize the storage backend and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.scheduling.offset()));
    let policy: Arc<dyn AvailabilityPolicy> =
        Arc::new(WeekdayRandomPolicy::new(config.scheduling.rules()));

    let builder = ServiceContext::builder()
        .clock(clock)
        .availability_policy(policy)
        .completion_policy(config.scheduling.completion_policy);

    let context = match config.storage.backend {
        StorageBackend::Memory => memory_context(builder, config.storage.seed_demo_data).await?,
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;
            postgres_context(builder, database, config.storage.seed_demo_data).await?
        }
    };

    Ok(AppState::new(context, config))
}

async fn memory_context(builder: ServiceContextBuilder, seed: bool) -> Result<ServiceContext, AppError> {
    let users = if seed { demo_users() } else { Vec::new() };
    let context = builder
        .user_directory(Arc::new(MemoryUserDirectory::from_users(users.clone())))
        .appointment_repo(Arc::new(MemoryAppointmentRepository::new()))
        .availability_repo(Arc::new(MemoryAvailabilityRepository::new()))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if seed {
        seed_availability(&context, &users).await?;
    }
    info!(users = users.len(), "In-memory storage ready");
    Ok(context)
}

async fn postgres_context(
    builder: ServiceContextBuilder,
    database: &DatabaseConfig,
    seed: bool,
) -> Result<ServiceContext, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Migrations applied");
    }

    let directory = PgUserDirectory::new(pool.clone());

    // Demo users are only written into an empty directory
    let mut mentors = directory.find_mentors().await?;
    let seeded = if seed && mentors.is_empty() {
        let users = demo_users();
        for user in &users {
            directory.upsert(user).await?;
        }
        mentors = users.iter().filter(|u| u.is_mentor()).cloned().collect();
        users
    } else {
        Vec::new()
    };

    // Mentor profiles are also kept locally so reads survive a database outage
    let local = MemoryUserDirectory::from_users(mentors);

    let context = builder
        .pool(pool.clone())
        .user_directory(Arc::new(FallbackUserDirectory::new(directory, local)))
        .appointment_repo(Arc::new(PgAppointmentRepository::new(pool.clone())))
        .availability_repo(Arc::new(PgAvailabilityRepository::new(pool)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if !seeded.is_empty() {
        seed_availability(&context, &seeded).await?;
    }
    Ok(context)
}

async fn seed_availability(
    context: &ServiceContext,
    users: &[mentor_core::User],
) -> Result<(), AppError> {
    seed_directory(
        users,
        context.availability_repo(),
        context.availability_policy(),
        context.clock().today(),
    )
    .await?;
    Ok(())
}

/// Serve `app` on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    run_server(app, listener).await
}
