//! Error types for huddle.

use thiserror::Error;

/// Errors that can occur in huddle operations.
///
/// None of these are fatal: each one is local to the operation that
/// produced it, and the store stays usable afterwards.
#[derive(Error, Debug)]
pub enum HuddleError {
    /// The caller supplied input that can't become a valid record
    /// (blank title, unparseable date, zero reminder offset, ...).
    #[error("{0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Could not save data: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HuddleError {
    fn from(e: serde_json::Error) -> Self {
        HuddleError::Serialization(e.to_string())
    }
}

/// Result type alias for huddle operations.
pub type HuddleResult<T> = Result<T, HuddleError>;
