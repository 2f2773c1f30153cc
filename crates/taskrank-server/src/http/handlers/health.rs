//! Liveness and metrics handlers.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::http::responses::HealthResponse;
use crate::metrics::collect_metrics;
use crate::state::AppState;

/// GET /health - Report liveness and the scoring date in effect.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        today: state.scorer.today().format("%Y-%m-%d").to_string(),
        suggestion_limit: state.config.suggestion_limit,
    })
}

/// GET /metrics - Batch counters in Prometheus text format.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        collect_metrics(&state),
    )
}
