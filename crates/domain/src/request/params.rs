//! Assembled request parameters

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{HttpMethod, Query};
use crate::error::DomainResult;

/// Fully-built parameters for one dispatch.
///
/// The runner assembles these from a route test; a `ModifyParams` hook may
/// then mutate them (for example to add an authorization header) before
/// they reach the request executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Absolute URL, query string included
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RequestParams {
    /// Creates parameters with the JSON content type header every route
    /// test sends.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            method,
            headers,
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Appends the encoded query to the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be URL-encoded.
    pub fn append_query(&mut self, query: &Query) -> DomainResult<()> {
        let encoded = query.encode()?;
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url.push(separator);
        self.url.push_str(&encoded);
        Ok(())
    }
}
