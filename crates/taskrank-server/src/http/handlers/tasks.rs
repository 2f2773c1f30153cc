//! Task ranking handlers.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::{info, warn};

use taskrank_core::{suggest, ScoredTask};

use crate::http::error::ApiError;
use crate::http::responses::SuggestResponse;
use crate::state::AppState;

/// POST /api/tasks/analyze/ - Rank every task of the batch.
pub async fn analyze_tasks(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<ScoredTask>>, ApiError> {
    let ranked = process_batch(&state, &body)?;
    Ok(Json(ranked))
}

/// POST /api/tasks/suggest/ - Return the best-scored tasks of the batch.
pub async fn suggest_tasks(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SuggestResponse>, ApiError> {
    let ranked = process_batch(&state, &body)?;
    Ok(Json(SuggestResponse {
        suggestions: suggest(ranked, state.config.suggestion_limit),
    }))
}

/// Parse, validate, score and sort a batch.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// every failure, including a missing content type, yields the same
/// `{"error": ...}` shape.
fn process_batch(state: &AppState, body: &[u8]) -> Result<Vec<ScoredTask>, ApiError> {
    let result = serde_json::from_slice::<Value>(body)
        .map_err(|e| ApiError::InvalidJson(e.to_string()))
        .and_then(|payload| state.scorer.rank_payload(&payload).map_err(ApiError::from));

    match result {
        Ok(ranked) => {
            state.metrics.record_scored(ranked.len());
            info!(
                tasks = ranked.len(),
                top_score = ranked.first().map(|t| t.score),
                "Scored task batch"
            );
            Ok(ranked)
        }
        Err(e) => {
            state.metrics.record_rejected();
            warn!(error = %e, "Rejected task batch");
            Err(e)
        }
    }
}
