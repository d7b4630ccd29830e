//! Declarative suite files.
//!
//! A suite file lists route tests as data, plus optional defaults shared by
//! all of them:
//!
//! ```yaml
//! base_url: http://localhost:8080
//! headers:
//!   Authorization: Bearer dev-token
//! defaults:
//!   expected_status: 200
//! tests:
//!   - name: health
//!     path: /health
//!   - name: missing release
//!     path: /releases/0
//!     expected_status: 404
//! ```
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use routecheck_domain::{ParamsHook, RouteTest, UrlResolver};

/// Errors that can occur while loading a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The file could not be read.
    #[error("failed to read suite {path}: {source}")]
    Io {
        /// Suite file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The YAML is malformed.
    #[error("invalid YAML suite: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON is malformed.
    #[error("invalid JSON suite: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding of a suite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML document
    Yaml,
    /// JSON document
    Json,
}

impl SuiteFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// A parsed suite file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Suite {
    /// Base URL that test paths are resolved against
    pub base_url: Option<String>,
    /// Headers added to every request whose test has no parameter hook
    pub headers: BTreeMap<String, String>,
    /// Template applied to every test
    pub defaults: Option<RouteTest>,
    /// The tests, in run order
    pub tests: Vec<RouteTest>,
}

impl Suite {
    /// Parses a suite from text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid suite in `format`.
    pub fn parse(text: &str, format: SuiteFormat) -> Result<Self, SuiteError> {
        match format {
            SuiteFormat::Yaml => Ok(serde_yaml::from_str(text)?),
            SuiteFormat::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Replaces the base URL (builder pattern).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Turns the suite into runnable tests.
    ///
    /// Applies `defaults`, then gives every test without a resolver one
    /// rooted at `base_url`, and every test without a parameter hook one
    /// that adds `headers`.
    #[must_use]
    pub fn into_tests(self) -> Vec<RouteTest> {
        let mut tests = self.tests;

        if let Some(defaults) = &self.defaults {
            defaults.apply(&mut tests);
        }

        if let Some(base_url) = self.base_url {
            let resolver = UrlResolver::with_base(base_url);
            for test in tests.iter_mut().filter(|t| t.get_url.is_none()) {
                test.get_url = Some(resolver.clone());
            }
        }

        if !self.headers.is_empty() {
            let mut ambient = RouteTest::template();
            ambient.modify_params = Some(ParamsHook::set_headers(self.headers));
            ambient.apply(&mut tests);
        }

        tests
    }
}

/// Reads and parses a suite file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_suite(path: &Path) -> Result<Suite, SuiteError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let suite = Suite::parse(&text, SuiteFormat::from_path(path))?;
    debug!(path = %path.display(), tests = suite.tests.len(), "loaded suite");
    Ok(suite)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routecheck_domain::{HttpMethod, RequestParams};
    use std::io::Write;

    const YAML: &str = r#"
base_url: http://localhost:8080/
headers:
  X-Api-Key: dev
defaults:
  method: POST
  expected_status: 200
tests:
  - name: health
    path: /health
    method: GET
  - name: create
    path: /releases
    body: {title: Night}
    expected_status: 201
    expected_shape:
      id: {"$type": number}
  - name: focused
    url: http://other/ping
    only: true
"#;

    #[test]
    fn test_parse_yaml_and_expand() {
        let tests = Suite::parse(YAML, SuiteFormat::Yaml).unwrap().into_tests();

        assert_eq!(tests.len(), 3);
        assert_eq!(tests[0].method, Some(HttpMethod::Get));
        assert_eq!(tests[0].expected_status, Some(200));
        assert_eq!(tests[1].method, Some(HttpMethod::Post));
        assert_eq!(tests[1].expected_status, Some(201));
        assert!(tests[1].expected_shape.is_some());
        assert!(tests[2].only);
        assert_eq!(tests[2].explicit_url(), Some("http://other/ping"));

        let resolver = tests[0].get_url.as_ref().unwrap();
        assert_eq!(resolver.resolve("/health"), "http://localhost:8080/health");

        let mut params = RequestParams::new(HttpMethod::Get, "http://localhost");
        tests[1].modify_params.as_ref().unwrap().run(&mut params).unwrap();
        assert_eq!(params.header("x-api-key"), Some("dev"));
    }

    #[test]
    fn test_parse_json() {
        let suite = Suite::parse(
            r#"{"tests": [{"name": "a", "url": "http://x/a", "body_should_have": ["ok"]}]}"#,
            SuiteFormat::Json,
        )
        .unwrap();
        let tests = suite.into_tests();
        assert_eq!(tests[0].body_should_have, Some(vec!["ok".to_string()]));
        assert!(tests[0].get_url.is_none());
        assert!(tests[0].modify_params.is_none());
    }

    #[test]
    fn test_base_url_override() {
        let tests = Suite::parse(YAML, SuiteFormat::Yaml)
            .unwrap()
            .with_base_url("http://staging")
            .into_tests();
        let resolver = tests[0].get_url.as_ref().unwrap();
        assert_eq!(resolver.resolve("/health"), "http://staging/health");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Suite::parse("tests: [name: {", SuiteFormat::Yaml).unwrap_err();
        assert!(matches!(err, SuiteError::Yaml(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SuiteFormat::from_path(Path::new("s.json")), SuiteFormat::Json);
        assert_eq!(SuiteFormat::from_path(Path::new("s.yaml")), SuiteFormat::Yaml);
        assert_eq!(SuiteFormat::from_path(Path::new("suite")), SuiteFormat::Yaml);
    }

    #[tokio::test]
    async fn test_load_suite_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let suite = load_suite(file.path()).await.unwrap();

        assert_eq!(suite.tests.len(), 3);
        assert_eq!(suite.base_url.as_deref(), Some("http://localhost:8080/"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_suite(Path::new("/definitely/not/here.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::Io { .. }));
    }
}
