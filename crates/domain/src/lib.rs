//! Routecheck Domain - Core types for declarative route tests
//!
//! This crate defines the data model of the harness: test descriptors,
//! request parameters, response snapshots, cookies and structural shapes.
//! All types here are pure Rust with no I/O dependencies.

pub mod cookie;
pub mod error;
pub mod request;
pub mod response;
pub mod shape;
pub mod testing;

pub use cookie::{Cookie, capture_cookies};
pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, Query, RequestParams};
pub use response::ResponseSpec;
pub use shape::{ExpectedShape, Expectation, Mismatch, ShapeMismatch, ValueKind};
pub use testing::{
    HookError, HookResult, ParamsHook, PreflightHook, RouteTest, TestOutcome, UrlResolver,
};
