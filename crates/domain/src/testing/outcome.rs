//! Captured output of a route test run

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a successful run captured from the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Status code, if a response was obtained
    pub status: Option<u16>,
    /// Raw response body text (empty without a response)
    pub body: String,
    /// Body decoded as JSON, when it decoded
    pub response: Option<Value>,
    /// Response cookies by name, last write wins
    pub cookies: BTreeMap<String, String>,
}

impl TestOutcome {
    /// Decodes the captured response into a caller-chosen type.
    ///
    /// Returns `None` when no JSON body was captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not fit `T`.
    pub fn response_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.response
            .as_ref()
            .map(|value| T::deserialize(value))
    }

    /// Returns a captured cookie value.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
