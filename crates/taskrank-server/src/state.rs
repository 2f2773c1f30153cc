//! Shared application state.

use std::sync::Arc;

use taskrank_core::{Clock, Scorer, SystemClock};

use crate::config::Config;
use crate::metrics::Metrics;

/// Shared application state.
///
/// Nothing here changes between requests except the metric counters; task
/// batches are never stored.
pub struct AppState {
    /// Server configuration.
    pub config: Config,

    /// Scores batches against the configured clock.
    pub scorer: Scorer<Box<dyn Clock>>,

    /// Request counters.
    pub metrics: Metrics,
}

impl AppState {
    /// Create a new AppState using the system clock.
    pub fn new(config: Config) -> Arc<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Create a new AppState with a custom clock.
    pub fn with_clock(config: Config, clock: impl Clock + 'static) -> Arc<Self> {
        Arc::new(Self {
            config,
            scorer: Scorer::new(Box::new(clock) as Box<dyn Clock>),
            metrics: Metrics::default(),
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: Config::default(),
            scorer: Scorer::new(Box::new(SystemClock) as Box<dyn Clock>),
            metrics: Metrics::default(),
        }
    }
}
