//! Diagnostic context attached to response failures

use std::fmt;

use serde_json::Value;

use routecheck_domain::RequestParams;

/// Request and response details echoed in failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticContext {
    /// Raw response body (empty without a response)
    pub response_body: String,
    /// Final request URL
    pub url: String,
    /// Request method
    pub method: String,
    /// Request payload as JSON text (empty without a payload)
    pub payload: String,
}

impl DiagnosticContext {
    /// Captures the context of one dispatch.
    #[must_use]
    pub fn new(response_body: &str, params: &RequestParams, payload: Option<&Value>) -> Self {
        Self {
            response_body: response_body.to_string(),
            url: params.url.clone(),
            method: params.method.to_string(),
            payload: payload.map(Value::to_string).unwrap_or_default(),
        }
    }
}

impl fmt::Display for DiagnosticContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nResponse: {}\nURL: {}\nMethod: {}\nPayload: {}",
            self.response_body, self.url, self.method, self.payload
        )
    }
}
