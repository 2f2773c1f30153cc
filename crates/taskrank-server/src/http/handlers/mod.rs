//! HTTP request handlers.

mod health;
mod tasks;

pub use health::{health_check, metrics_handler};
pub use tasks::{analyze_tasks, suggest_tasks};
