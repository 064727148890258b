//! zyarat-ai library interface
//!
//! Exposes the router, application state and the response normalization
//! pipeline for integration testing and standalone use.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod services;

pub use crate::config::Settings;
pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{AnalysisService, UpstreamError};

/// Application state shared across handlers
///
/// Everything here is immutable after start-up; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub settings: Arc<Settings>,
    /// Image analysis pipeline (holds the pooled HTTP client)
    pub analysis: AnalysisService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, UpstreamError> {
        let settings = Arc::new(settings);
        let analysis = AnalysisService::new(Arc::clone(&settings))?;

        Ok(Self {
            settings,
            analysis,
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .merge(api::health_routes())
        .merge(api::analyze_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
