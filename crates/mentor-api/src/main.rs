//! Mentor scheduling API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p mentor-api
//! ```
//!
//! Configuration is loaded from environment variables and `.env`.

use anyhow::Context;
use mentor_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        backend = ?config.storage.backend,
        address = %config.api.address(),
        "Configuration loaded"
    );

    mentor_api::run(config).await.context("running server")?;

    Ok(())
}
