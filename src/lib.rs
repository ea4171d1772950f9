pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod telemetry;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handlers::{health_handler, metrics_handler, profile_handler};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/github", get(profile_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
