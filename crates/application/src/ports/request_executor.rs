//! Request executor port
//!
//! Defines the boundary between the test runner and the HTTP transport.

use async_trait::async_trait;
use serde_json::Value;

use routecheck_domain::{RequestParams, ResponseSpec};

/// Errors a request executor can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Nothing was listening on the target.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for performing the HTTP call of a route test.
///
/// Implementations own transport concerns such as timeouts and TLS; the
/// runner only sees the captured [`ResponseSpec`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Sends the request and captures the response.
    ///
    /// A response with any status code is a success; only transport
    /// failures are errors.
    ///
    /// # Arguments
    /// * `params` - Method, absolute URL (query included) and headers
    /// * `body` - Payload to send as JSON, if any
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or its body cannot
    /// be read.
    async fn execute(
        &self,
        params: &RequestParams,
        body: Option<&Value>,
    ) -> Result<ResponseSpec, ExecutorError>;
}
