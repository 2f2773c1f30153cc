//! TaskRank Core
//!
//! Pure scoring and dependency logic, with no dependencies on:
//! - Network/HTTP
//! - Async runtime
//! - Persistence
//!
//! A batch of tasks is always handled as a whole: the dependency graph and
//! the blocking counts are rebuilt from the batch on every call.

pub mod error;
pub mod graph;
pub mod ranking;
pub mod scoring;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::{detect_cycle, DependencyGraph};
pub use ranking::{rank_payload, rank_tasks, suggest, ScoredTask, DEFAULT_SUGGESTION_LIMIT};
pub use scoring::{calculate_score, Clock, FixedClock, ScoreBreakdown, Scorer, SystemClock};
pub use task::Task;
