//! HTTP server.
//!
//! Provides endpoints for:
//! - Ranking a task batch (`/api/tasks/analyze/`)
//! - Top suggestions for a task batch (`/api/tasks/suggest/`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod error;
mod handlers;
pub mod responses;

pub use error::ApiError;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser front ends post from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/tasks/analyze/", post(handlers::analyze_tasks))
        .route("/api/tasks/analyze", post(handlers::analyze_tasks))
        .route("/api/tasks/suggest/", post(handlers::suggest_tasks))
        .route("/api/tasks/suggest", post(handlers::suggest_tasks))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
