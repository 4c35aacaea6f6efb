//! Error types shared across the recommendation service
//!
//! Storage, embedding and configuration keep their own error enums next
//! to their implementations; this type is the shared vocabulary for the
//! crates that talk to the outside world.

use thiserror::Error;

/// Service-wide error type
#[derive(Error, Debug)]
pub enum BookmatchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookmatchError {
    pub fn network(msg: impl Into<String>) -> Self {
        BookmatchError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        BookmatchError::Parse(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        BookmatchError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        BookmatchError::Internal(msg.into())
    }
}

/// Result type alias for service operations
pub type BookmatchResult<T> = Result<T, BookmatchError>;
