/// MyCerts - employee certification tracking service
///
/// Tracks employee certifications, offered trainings, work locations, and
/// required-vs-completed training hours behind a session-authenticated API.

mod api;
mod assignment;
mod auth;
mod catalog;
mod config;
mod context;
mod credential;
mod db;
mod directory;
mod employee;
mod error;
mod expiry;
mod server;
mod validation;

use config::ServerConfig;
use context::AppContext;
use error::CertsResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> CertsResult<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging; RUST_LOG wins, the configured level is the fallback
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mycerts={},tower_http=debug", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting MyCerts v{} with database {}",
        env!("CARGO_PKG_VERSION"),
        config.storage.database.display()
    );

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}
