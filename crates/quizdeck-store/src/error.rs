//! Store error types.

use thiserror::Error;

/// Errors that can occur in the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Adding a user whose ID is already taken.
    #[error("user ID already exists: {0}")]
    DuplicateUser(String),

    /// Operating on a user that does not exist.
    #[error("user not found: {0}")]
    UnknownUser(String),

    /// Reading or writing the backing file failed.
    #[error("user file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds invalid JSON.
    #[error("user file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
