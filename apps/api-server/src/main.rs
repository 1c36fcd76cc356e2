//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

mod config;
mod handlers;
mod lifecycle;
mod middleware;
mod state;

use config::AppConfig;
use lifecycle::Application;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    // Connect to the store, then bind the listener.
    let app = Application::build(&config).await?;
    tracing::info!("Quill API server listening on port {}", app.port());

    // Ctrl-C tears the process down through the lifecycle handle: store
    // first, then listener.
    let stop = app.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if let Err(e) = stop.stop().await {
                tracing::error!("Shutdown error: {e:#}");
            }
        }
    });

    app.run_until_stopped().await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,quill_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
