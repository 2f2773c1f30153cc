//! Core domain errors.

use thiserror::Error;

/// Errors that reject a whole task batch.
///
/// The display strings are returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The payload is not a JSON array.
    #[error("Expected a list of tasks (JSON array).")]
    InvalidPayload,

    /// An element of the batch is not a JSON object.
    #[error("Each task must be a JSON object.")]
    InvalidTask { index: usize },

    /// A task has no title, or an empty one.
    #[error("Each task must have a non-empty title.")]
    MissingTitle { index: usize },

    /// The dependency graph contains at least one cycle.
    #[error("Circular dependency detected.")]
    CircularDependency,
}

impl CoreError {
    /// Point a per-task error at position `index` of the batch.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::InvalidTask { .. } => Self::InvalidTask { index },
            Self::MissingTitle { .. } => Self::MissingTitle { index },
            other => other,
        }
    }

    /// Batch position of the rejected task, if the error concerns one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidTask { index } | Self::MissingTitle { index } => Some(*index),
            _ => None,
        }
    }
}
