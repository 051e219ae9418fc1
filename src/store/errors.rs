//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read records {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid records JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error("Invalid record id: {0}")]
    InvalidId(String),

    #[error("Malformed records file: {0}")]
    Malformed(String),

    /// Backend failure while serving a request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
