//! Single route test runner.
//!
//! Runs one descriptor through a fixed sequence: preflight, URL
//! resolution, request assembly, parameter hook, dispatch, then the
//! response checks (presence and status, exact body, required substrings,
//! forbidden substrings, body shape, cookie capture, cookie shape). The
//! first failing step ends the run.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use routecheck_domain::{RequestParams, ResponseSpec, RouteTest, TestOutcome, capture_cookies};

use crate::error::TestFailure;
use crate::ports::RequestExecutor;
use crate::testing::DiagnosticContext;

/// Executes route tests against a request executor.
///
/// # Example
///
/// ```ignore
/// let runner = TestRunner::new(Arc::new(ReqwestExecutor::new()?));
/// let outcome = runner
///     .run(&RouteTest::new("health").with_url("http://localhost:8080/health").expect_status(200))
///     .await?;
/// ```
pub struct TestRunner<E: RequestExecutor> {
    executor: Arc<E>,
}

impl<E: RequestExecutor> Clone for TestRunner<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

/// What dispatch produced; transport errors are already reported.
struct Dispatched {
    response: Option<ResponseSpec>,
    decoded: Option<Value>,
}

impl<E: RequestExecutor> TestRunner<E> {
    /// Creates a runner using the given executor.
    pub const fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Runs one route test.
    ///
    /// # Errors
    ///
    /// Returns the first failing step: a hook error verbatim, a missing
    /// URL, or an assertion mismatch with diagnostic context.
    pub async fn run(&self, test: &RouteTest) -> Result<TestOutcome, TestFailure> {
        if let Some(preflight) = &test.preflight {
            preflight.run().map_err(TestFailure::Hook)?;
        }

        let params = Self::build_params(test)?;
        debug!(method = %params.method, url = %params.url, "dispatching route test");
        let dispatched = self.dispatch(test, &params).await;

        Self::verify(test, &params, dispatched)
    }

    fn resolve_url(test: &RouteTest) -> Result<String, TestFailure> {
        if let Some(url) = test.explicit_url() {
            return Ok(url.to_string());
        }
        let resolver = test.get_url.as_ref().ok_or(TestFailure::MissingUrl)?;
        Ok(resolver.resolve(test.path.as_deref().unwrap_or_default()))
    }

    fn build_params(test: &RouteTest) -> Result<RequestParams, TestFailure> {
        let url = Self::resolve_url(test)?;
        let mut params = RequestParams::new(test.effective_method(), url);

        if let Some(query) = &test.query {
            params.append_query(query)?;
        }

        if let Some(hook) = &test.modify_params {
            hook.run(&mut params).map_err(TestFailure::Hook)?;
        }

        Ok(params)
    }

    async fn dispatch(&self, test: &RouteTest, params: &RequestParams) -> Dispatched {
        match self.executor.execute(params, test.body.as_ref()).await {
            Ok(response) => {
                let decoded = match response.decode_body() {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        if test.expects_success() {
                            warn!(url = %params.url, error = %e, "Request error");
                        }
                        None
                    }
                };
                Dispatched {
                    response: Some(response),
                    decoded,
                }
            }
            Err(e) => {
                if test.expects_success() {
                    warn!(url = %params.url, error = %e, "Request error");
                }
                Dispatched {
                    response: None,
                    decoded: None,
                }
            }
        }
    }

    fn verify(
        test: &RouteTest,
        params: &RequestParams,
        dispatched: Dispatched,
    ) -> Result<TestOutcome, TestFailure> {
        let Dispatched { response, decoded } = dispatched;
        let body = response.as_ref().map_or("", |r| r.body.as_str());
        let context = || DiagnosticContext::new(body, params, test.body.as_ref());

        if !test.nil_response {
            let Some(response) = &response else {
                return Err(TestFailure::MissingResponse { context: context() });
            };
            if let Some(expected) = test.expected_status {
                if response.status != expected {
                    return Err(TestFailure::StatusMismatch {
                        expected,
                        actual: response.status,
                        context: context(),
                    });
                }
            }
        }

        if let Some(expected) = &test.expected_body {
            if body != expected {
                return Err(TestFailure::BodyMismatch {
                    expected: expected.clone(),
                    found: body.to_string(),
                });
            }
        }

        let shown_body = if test.hide_response_body { "" } else { body };

        if let Some(required) = &test.body_should_have {
            if let Some((index, value)) = required.iter().enumerate().find(|(_, s)| !body.contains(s.as_str())) {
                return Err(TestFailure::MissingSubstring {
                    index,
                    value: value.clone(),
                    body: shown_body.to_string(),
                });
            }
        }

        if let Some(forbidden) = &test.body_should_not_have {
            if let Some((index, value)) = forbidden.iter().enumerate().find(|(_, s)| body.contains(s.as_str())) {
                return Err(TestFailure::ForbiddenSubstring {
                    index,
                    value: value.clone(),
                    body: shown_body.to_string(),
                });
            }
        }

        if let Some(shape) = &test.expected_shape {
            shape
                .check_json_str(body)
                .map_err(|source| TestFailure::BodyShape {
                    source,
                    context: context(),
                })?;
        }

        let cookies: BTreeMap<String, String> = response
            .as_ref()
            .map(|r| capture_cookies(&r.cookies))
            .unwrap_or_default();

        if let Some(shape) = &test.expected_cookies {
            let document = Value::Object(
                cookies
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                    .collect(),
            );
            shape
                .check_value(&document)
                .map_err(|source| TestFailure::CookieShape {
                    source,
                    context: context(),
                })?;
        }

        Ok(TestOutcome {
            status: response.as_ref().map(|r| r.status),
            body: body.to_string(),
            response: decoded,
            cookies,
        })
    }
}
