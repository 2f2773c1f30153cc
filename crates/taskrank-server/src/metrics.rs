//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::state::AppState;

/// Counters updated by the task handlers.
#[derive(Debug, Default)]
pub struct Metrics {
    batches_scored: AtomicU64,
    batches_rejected: AtomicU64,
    tasks_scored: AtomicU64,
}

impl Metrics {
    /// Record a batch that was scored successfully.
    pub fn record_scored(&self, tasks: usize) {
        self.batches_scored.fetch_add(1, Ordering::Relaxed);
        self.tasks_scored.fetch_add(tasks as u64, Ordering::Relaxed);
    }

    /// Record a batch that was rejected.
    pub fn record_rejected(&self) {
        self.batches_rejected.fetch_add(1, Ordering::Relaxed);
    }
}

/// Collect all metrics from AppState and format as Prometheus text.
pub fn collect_metrics(state: &AppState) -> String {
    let metrics = &state.metrics;
    let scored = metrics.batches_scored.load(Ordering::Relaxed);
    let rejected = metrics.batches_rejected.load(Ordering::Relaxed);
    let tasks = metrics.tasks_scored.load(Ordering::Relaxed);

    let mut output = String::new();

    writeln!(
        output,
        "# HELP taskrank_batches_total Number of task batches by outcome"
    )
    .ok();
    writeln!(output, "# TYPE taskrank_batches_total counter").ok();
    writeln!(output, "taskrank_batches_total{{outcome=\"scored\"}} {scored}").ok();
    writeln!(
        output,
        "taskrank_batches_total{{outcome=\"rejected\"}} {rejected}"
    )
    .ok();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP taskrank_tasks_scored_total Number of tasks scored"
    )
    .ok();
    writeln!(output, "# TYPE taskrank_tasks_scored_total counter").ok();
    writeln!(output, "taskrank_tasks_scored_total {tasks}").ok();

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_metrics_empty_state() {
        let state = AppState::default();
        let output = collect_metrics(&state);

        assert!(output.contains("# TYPE taskrank_batches_total counter"));
        assert!(output.contains("taskrank_batches_total{outcome=\"scored\"} 0"));
        assert!(output.contains("taskrank_batches_total{outcome=\"rejected\"} 0"));
        assert!(output.contains("taskrank_tasks_scored_total 0"));
    }

    #[test]
    fn test_collect_metrics_counts() {
        let state = AppState::default();
        state.metrics.record_scored(4);
        state.metrics.record_scored(2);
        state.metrics.record_rejected();

        let output = collect_metrics(&state);

        assert!(output.contains("taskrank_batches_total{outcome=\"scored\"} 2"));
        assert!(output.contains("taskrank_batches_total{outcome=\"rejected\"} 1"));
        assert!(output.contains("taskrank_tasks_scored_total 6"));
    }
}
