//! Client library for the TaskRank server.
//!
//! Provides an HTTP client for the ranking endpoints.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpClient;
