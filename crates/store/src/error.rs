//! Store error type.

use fieldplan_core::{SectionId, TaskId};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Operating on a dead id is a hard error, not a silent no-op: callers
/// holding stale references find out immediately.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No task with this id
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// No live section with this id
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// The same section id appeared twice in a reorder input
    #[error("duplicate section id in reorder input: {0}")]
    DuplicateReorderId(SectionId),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
