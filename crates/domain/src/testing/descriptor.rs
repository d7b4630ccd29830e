//! Route test descriptor type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::hooks::{HookResult, ParamsHook, PreflightHook, UrlResolver};
use crate::request::{HttpMethod, Query, RequestParams};
use crate::shape::ExpectedShape;

/// Declarative description of one route test.
///
/// Every expectation is optional; `None` means "do not check". The same
/// convention marks fields a template may fill in through
/// [`RouteTest::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTest {
    /// Name used when reporting a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When any test in a batch sets this, only those tests run
    pub only: bool,
    /// Keep the response body out of substring failure messages
    pub hide_response_body: bool,

    /// HTTP method (`GET` when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Absolute URL; takes precedence over `path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Path handed to `get_url` when `url` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Resolves `path` to an absolute URL
    #[serde(skip)]
    pub get_url: Option<UrlResolver>,
    /// Query parameters appended to the URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Request payload, sent as JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Mutates the assembled request before dispatch
    #[serde(skip)]
    pub modify_params: Option<ParamsHook>,
    /// Runs before anything else
    #[serde(skip)]
    pub preflight: Option<PreflightHook>,

    /// Expected status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<u16>,
    /// Expected body, compared exactly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_body: Option<String>,
    /// Substrings the body must contain, checked in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_should_have: Option<Vec<String>>,
    /// Substrings the body must not contain, checked in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_should_not_have: Option<Vec<String>>,
    /// Structural shape of the JSON body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_shape: Option<ExpectedShape>,
    /// Structural shape of the response cookies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_cookies: Option<ExpectedShape>,
    /// Do not require a response (for tests expecting a transport failure)
    pub nil_response: bool,
}

impl RouteTest {
    /// Creates a named test with nothing else set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates an unnamed template carrying only defaults.
    #[must_use]
    pub fn template() -> Self {
        Self::default()
    }

    /// Returns the method to send.
    #[must_use]
    pub fn effective_method(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }

    /// Returns the explicit URL, ignoring an empty one.
    #[must_use]
    pub fn explicit_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns true when this test expects a non-error status.
    ///
    /// An unset status counts as expecting success.
    #[must_use]
    pub fn expects_success(&self) -> bool {
        self.expected_status.is_none_or(|status| status < 300)
    }

    /// Fills every unset default-able field of `tests` from this template.
    ///
    /// Covered fields are the path, method, parameter hook, expected
    /// status, expected shape, query, preflight hook, expected cookies,
    /// both substring lists and the expected body. A field a test already
    /// sets is left alone, and no other field is touched, so applying the
    /// same template twice changes nothing. The slice is returned to allow
    /// chaining templates.
    pub fn apply<'a>(&self, tests: &'a mut [Self]) -> &'a mut [Self] {
        for test in tests.iter_mut() {
            inherit(&mut test.path, self.path.as_ref());
            inherit(&mut test.method, self.method.as_ref());
            inherit(&mut test.modify_params, self.modify_params.as_ref());
            inherit(&mut test.expected_status, self.expected_status.as_ref());
            inherit(&mut test.expected_shape, self.expected_shape.as_ref());
            inherit(&mut test.query, self.query.as_ref());
            inherit(&mut test.preflight, self.preflight.as_ref());
            inherit(&mut test.expected_cookies, self.expected_cookies.as_ref());
            inherit(&mut test.body_should_have, self.body_should_have.as_ref());
            inherit(&mut test.body_should_not_have, self.body_should_not_have.as_ref());
            inherit(&mut test.expected_body, self.expected_body.as_ref());
        }
        tests
    }

    /// Marks this test as one of the only tests to run.
    #[must_use]
    pub const fn only(mut self) -> Self {
        self.only = true;
        self
    }

    /// Keeps the response body out of substring failure messages.
    #[must_use]
    pub const fn hide_response_body(mut self) -> Self {
        self.hide_response_body = true;
        self
    }

    /// Skips the requirement that a response exists.
    #[must_use]
    pub const fn nil_response(mut self) -> Self {
        self.nil_response = true;
        self
    }

    /// Set the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Set an absolute URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the path resolved through `get_url`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the path resolver.
    #[must_use]
    pub fn with_get_url(mut self, resolver: UrlResolver) -> Self {
        self.get_url = Some(resolver);
        self
    }

    /// Set the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the JSON payload.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the preflight hook.
    #[must_use]
    pub fn with_preflight(mut self, f: impl Fn() -> HookResult + Send + Sync + 'static) -> Self {
        self.preflight = Some(PreflightHook::new(f));
        self
    }

    /// Set the parameter hook.
    #[must_use]
    pub fn with_modify_params(
        mut self,
        f: impl Fn(&mut RequestParams) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.modify_params = Some(ParamsHook::new(f));
        self
    }

    /// Expect a status code.
    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Expect an exact body.
    #[must_use]
    pub fn expect_body(mut self, body: impl Into<String>) -> Self {
        self.expected_body = Some(body.into());
        self
    }

    /// Expect the body to contain each substring.
    #[must_use]
    pub fn body_should_have<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_should_have = Some(substrings.into_iter().map(Into::into).collect());
        self
    }

    /// Expect the body to contain none of the substrings.
    #[must_use]
    pub fn body_should_not_have<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_should_not_have = Some(substrings.into_iter().map(Into::into).collect());
        self
    }

    /// Expect the JSON body to match a shape.
    #[must_use]
    pub fn expect_shape(mut self, shape: ExpectedShape) -> Self {
        self.expected_shape = Some(shape);
        self
    }

    /// Expect the response cookies to match a shape.
    #[must_use]
    pub fn expect_cookies(mut self, shape: ExpectedShape) -> Self {
        self.expected_cookies = Some(shape);
        self
    }
}

fn inherit<T: Clone>(target: &mut Option<T>, default: Option<&T>) {
    if target.is_none() {
        *target = default.cloned();
    }
}
