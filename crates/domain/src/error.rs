//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while assembling a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The query mapping could not be URL-encoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The response body could not be decoded as JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
