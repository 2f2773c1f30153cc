//! HTTP request and response types.

use serde::{Deserialize, Serialize};
use taskrank_core::ScoredTask;

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for the suggest endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Best-scored tasks, highest first.
    pub suggestions: Vec<ScoredTask>,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    /// Server version.
    pub version: String,

    /// Date urgency is computed against (`YYYY-MM-DD`).
    pub today: String,

    /// Tasks returned by the suggest endpoint.
    pub suggestion_limit: usize,
}
