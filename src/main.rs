//! Diplomacy variant service.
//!
//! Serves the bundled variant catalog over HTTP. Configuration comes from
//! the environment (see `Config::from_env`), optionally via a `.env` file.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diplo_variants::config::Config;
use diplo_variants::server::ApiServer;
use diplo_variants::variants;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let config = Config::from_env()?;
    let catalog = variants::catalog(config.launch_schedule.clone())?;

    ApiServer::new(config, Arc::new(catalog)).serve().await?;

    Ok(())
}
