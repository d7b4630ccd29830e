//! Request executor implementation using reqwest.
//!
//! This adapter implements the `RequestExecutor` port using the reqwest
//! library. It performs the HTTP call of a route test and captures status,
//! raw body and cookies.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::SET_COOKIE;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use routecheck_application::ports::{ExecutorError, RequestExecutor};
use routecheck_domain::{Cookie, HttpMethod, RequestParams, ResponseSpec};

/// Transport settings of the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Maximum redirects to follow.
    pub max_redirects: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("Routecheck/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

/// Request executor backed by `reqwest::Client`.
pub struct ReqwestExecutor {
    client: Client,
    config: ExecutorConfig,
}

impl ReqwestExecutor {
    /// Creates an executor with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::with_config(ExecutorConfig::default())
    }

    /// Creates an executor with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_config(config: ExecutorConfig) -> Result<Self, ExecutorError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ExecutorError::Other(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Returns the executor settings.
    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Full error text, sources included; reqwest keeps the OS reason
    /// (e.g. "Connection refused") in the source chain.
    fn error_chain(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    fn map_error(&self, error: &reqwest::Error, url: &Url) -> ExecutorError {
        let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
        if error.is_timeout() {
            return ExecutorError::Timeout { timeout_ms };
        }

        let message = Self::error_chain(error);
        if error.is_connect() {
            if message.to_lowercase().contains("refused") {
                return ExecutorError::ConnectionRefused {
                    host: url.host_str().unwrap_or("unknown").to_string(),
                    port: url.port_or_known_default().unwrap_or(80),
                };
            }
            return ExecutorError::ConnectionFailed(message);
        }

        ExecutorError::Other(message)
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(
        &self,
        params: &RequestParams,
        body: Option<&Value>,
    ) -> Result<ResponseSpec, ExecutorError> {
        let url = Url::parse(&params.url)
            .map_err(|e| ExecutorError::InvalidUrl(format!("{e}: {}", params.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(params.method), url.clone());
        for (name, value) in &params.headers {
            builder = builder.header(name, value);
        }
        if let Some(payload) = body {
            builder = builder.json(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&e, &url))?;

        let status = response.status().as_u16();

        let cookies: Vec<Cookie> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(Cookie::from_set_cookie)
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| ExecutorError::BodyRead(e.to_string()))?;

        Ok(ResponseSpec {
            status,
            body,
            cookies,
        })
    }
}
