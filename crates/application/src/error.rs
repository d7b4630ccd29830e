//! Test failure types

use thiserror::Error;

use routecheck_domain::{DomainError, HookError, ShapeMismatch};

use crate::testing::DiagnosticContext;

/// Why a single route test failed.
///
/// Only the first failing check of a run is reported.
#[derive(Debug, Error)]
pub enum TestFailure {
    /// Neither a URL nor a path resolver was given.
    #[error("no test URL and no GetURL func")]
    MissingUrl,

    /// A preflight or parameter hook failed.
    #[error("{0}")]
    Hook(HookError),

    /// The request could not be assembled.
    #[error(transparent)]
    Request(#[from] DomainError),

    /// No response was obtained.
    #[error("response is missing{context}")]
    MissingResponse {
        /// Request and response details.
        context: DiagnosticContext,
    },

    /// The status code differed.
    #[error("Expected status {expected} but got {actual}.{context}")]
    StatusMismatch {
        /// Expected status code.
        expected: u16,
        /// Received status code.
        actual: u16,
        /// Request and response details.
        context: DiagnosticContext,
    },

    /// The body differed from the exact expected body.
    #[error("Body did not match\nExpected: {expected}\n  Found: {found}")]
    BodyMismatch {
        /// Expected body.
        expected: String,
        /// Received body.
        found: String,
    },

    /// A required substring was absent.
    #[error("Body did not contain [{index}]: '{value}'\nBody: {body}")]
    MissingSubstring {
        /// Position in the substring list.
        index: usize,
        /// The substring.
        value: String,
        /// Body as shown (empty when hidden).
        body: String,
    },

    /// A forbidden substring was present.
    #[error("Body should NOT contain [{index}]: '{value}'\nBody: {body}")]
    ForbiddenSubstring {
        /// Position in the substring list.
        index: usize,
        /// The substring.
        value: String,
        /// Body as shown (empty when hidden).
        body: String,
    },

    /// The JSON body did not match its expected shape.
    #[error("{source}{context}")]
    BodyShape {
        /// The matcher's report.
        source: ShapeMismatch,
        /// Request and response details.
        context: DiagnosticContext,
    },

    /// The cookies did not match their expected shape.
    #[error("cookies: {source}{context}")]
    CookieShape {
        /// The matcher's report.
        source: ShapeMismatch,
        /// Request and response details.
        context: DiagnosticContext,
    },
}

/// The first failing test of a batch.
#[derive(Debug, Error)]
#[error("[{index}]{} {source}", name_label(.name))]
pub struct BatchError {
    /// Position among the tests that were selected to run.
    pub index: usize,
    /// Name of the failing test, if it had one.
    pub name: Option<String>,
    /// Why it failed.
    pub source: TestFailure,
}

fn name_label(name: &Option<String>) -> String {
    name.as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| format!(" {n}"))
        .unwrap_or_default()
}
