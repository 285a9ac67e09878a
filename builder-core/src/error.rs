//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while mutating the builder state.
///
/// None of these reach the view layer directly: [`crate::BuilderStore::dispatch`]
/// turns them into logged no-ops. They exist so callers and tests can tell
/// why a mutation left the state untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No page with this id exists.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// No element with this id exists in the current page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The last remaining page cannot be deleted.
    #[error("Cannot delete the last page: {0}")]
    LastPage(String),

    /// An element id is already in use somewhere in the forest.
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// The move would put an element inside its own subtree.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred while writing an export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
