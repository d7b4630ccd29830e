//! Caller-supplied hooks of a route test

use std::fmt;
use std::sync::Arc;

use crate::request::RequestParams;

/// Error returned by a hook; surfaced unchanged as the test failure.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for hooks.
pub type HookResult = Result<(), HookError>;

/// Resolves a test path to an absolute URL.
///
/// Resolution cannot fail: an unusable URL surfaces later as a dispatch
/// error.
#[derive(Clone)]
pub struct UrlResolver(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl UrlResolver {
    /// Wraps a resolver function.
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Resolver that prefixes paths with a base URL.
    ///
    /// Exactly one slash separates the base and the path.
    #[must_use]
    pub fn with_base(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self::new(move |path| {
            let base = base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            if path.is_empty() {
                base.to_string()
            } else {
                format!("{base}/{path}")
            }
        })
    }

    /// Resolves a path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        (self.0)(path)
    }
}

/// Runs before anything else; a failure aborts the test.
#[derive(Clone)]
pub struct PreflightHook(Arc<dyn Fn() -> HookResult + Send + Sync>);

impl PreflightHook {
    /// Wraps a preflight function.
    pub fn new(f: impl Fn() -> HookResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Runs the hook.
    ///
    /// # Errors
    ///
    /// Returns the hook's own error.
    pub fn run(&self) -> HookResult {
        (self.0)()
    }
}

/// Mutates the assembled request parameters before dispatch.
#[derive(Clone)]
pub struct ParamsHook(Arc<dyn Fn(&mut RequestParams) -> HookResult + Send + Sync>);

impl ParamsHook {
    /// Wraps a parameter hook.
    pub fn new(f: impl Fn(&mut RequestParams) -> HookResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Hook that sets the given headers, replacing existing values.
    #[must_use]
    pub fn set_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers: Vec<(String, String)> = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(move |params| {
            for (name, value) in &headers {
                params.set_header(name.clone(), value.clone());
            }
            Ok(())
        })
    }

    /// Runs the hook.
    ///
    /// # Errors
    ///
    /// Returns the hook's own error.
    pub fn run(&self, params: &mut RequestParams) -> HookResult {
        (self.0)(params)
    }
}

macro_rules! opaque_debug {
    ($($name:ident),*) => {
        $(
            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(concat!(stringify!($name), "(..)"))
                }
            }
        )*
    };
}

opaque_debug!(UrlResolver, PreflightHook, ParamsHook);
