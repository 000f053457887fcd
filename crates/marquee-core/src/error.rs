use thiserror::Error;

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("concurrent update conflict on movie {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("movie not found: {0}")]
    NotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("nothing to select from: {0}")]
    EmptySelection(String),
    #[error("concurrent update conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
