//! Route test descriptors.
//!
//! A [`RouteTest`] declares one request/response exchange: how to build the
//! request, and what the response must look like. Running it produces a
//! [`TestOutcome`]; the descriptor itself is never mutated by a run.

mod descriptor;
mod hooks;
mod outcome;

pub use descriptor::RouteTest;
pub use hooks::{HookError, HookResult, ParamsHook, PreflightHook, UrlResolver};
pub use outcome::TestOutcome;
