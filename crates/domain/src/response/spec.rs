//! Response specification type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cookie::Cookie;
use crate::error::{DomainError, DomainResult};

/// Everything the request executor captured from one HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Raw response body text
    #[serde(default)]
    pub body: String,
    /// Cookies set by the response, in wire order, duplicates included
    #[serde(default)]
    pub cookies: Vec<Cookie>,
}

impl ResponseSpec {
    /// Creates a response with a status and body and nothing else.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds a cookie (builder pattern).
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Decodes the body as JSON.
    ///
    /// An empty (or whitespace-only) body decodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty body is not valid JSON.
    pub fn decode_body(&self) -> DomainResult<Option<Value>> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }
}
