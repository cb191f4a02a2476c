//! Tree Errors
//!
//! Errors raised by drop resolution and by caller-supplied mutations.

use std::time::Duration;

use thiserror::Error;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Failure reported by a `TreeMutations` implementation.
///
/// The controller treats every variant the same way: log, swallow, go idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The repository answered but refused the change (cycle, permissions, validation...)
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced an answer
    #[error("transport error: {0}")]
    Transport(String),

    /// The answer could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors surfaced by the drag engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Drag referenced an id missing from the current snapshot
    #[error("category {0} not found in current tree")]
    NotFound(String),

    #[error("commit failed: {0}")]
    Commit(#[from] MutationError),

    #[error("commit timed out after {0:?}")]
    TimedOut(Duration),
}
