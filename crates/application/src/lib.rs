//! Routecheck Application - Test runners and ports
//!
//! This crate defines the application layer with:
//! - The request executor port
//! - The single test runner and the batch runner
//! - Failure types carrying diagnostic context

pub mod error;
pub mod ports;
pub mod testing;

pub use error::{BatchError, TestFailure};
pub use ports::{ExecutorError, RequestExecutor};
pub use testing::{BatchReport, BatchRunner, DiagnosticContext, Selection, TestRunner, select_tests};
