//! TaskRank Server Library
//!
//! HTTP front end for the TaskRank core: batches of tasks come in as JSON,
//! ranked tasks go out. No task is stored between requests.

pub mod config;
pub mod http;
pub mod metrics;
pub mod state;

pub use config::Config;
pub use http::create_router;
pub use state::AppState;
