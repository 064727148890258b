//! zyarat-ai - Artifact Analysis Service
//!
//! Accepts photo uploads, asks a multimodal model (via OpenRouter) to
//! identify the Tunisian artifact shown, and returns a normalized JSON record.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use zyarat_ai::config::{CliArgs, Settings};
use zyarat_ai::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_path = dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let settings = Settings::resolve(args).context("Failed to resolve configuration")?;

    zyarat_common::logging::init_logging(&settings.logging)
        .context("Failed to initialize logging")?;

    info!("=== Zyarat Artifact Analysis Server starting up ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }
    settings.log_summary();

    let bind_address = settings.bind_address();
    let state = AppState::new(settings).context("Failed to create OpenRouter client")?;
    let app = zyarat_ai::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);
    info!("Server ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("=== Zyarat Artifact Analysis Server shutting down ===");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
