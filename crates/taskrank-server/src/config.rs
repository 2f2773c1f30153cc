//! Server configuration.

use taskrank_core::DEFAULT_SUGGESTION_LIMIT;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Number of tasks returned by the suggest endpoint.
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "127.0.0.1:8000".to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}
