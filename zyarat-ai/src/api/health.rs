//! Health check and liveness endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name ("zyarat-ai")
    pub module: String,
    /// Current time (RFC 3339)
    pub timestamp: String,
    pub system: SystemInfo,
    pub server: ServerInfo,
    /// Whether canned sample data replaces model calls
    pub sample_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub platform: String,
    pub arch: String,
    pub process_id: u32,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime_seconds = now
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "zyarat-ai".to_string(),
        timestamp: now.to_rfc3339(),
        system: SystemInfo {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            process_id: std::process::id(),
        },
        server: ServerInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            git_hash: env!("GIT_HASH").to_string(),
            build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
            build_profile: env!("BUILD_PROFILE").to_string(),
        },
        sample_mode: state.settings.use_sample_data,
    })
}

/// GET /ping
pub async fn ping() -> Json<Value> {
    Json(json!({
        "ping": "pong",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Zyarat Artifact Analysis API",
        "status": "online",
        "health_check": "/health",
    }))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ping", get(ping))
}
