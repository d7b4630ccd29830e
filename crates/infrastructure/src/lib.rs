//! Routecheck Infrastructure - Adapters and suite loading
//!
//! This crate provides the reqwest implementation of the request executor
//! port and the loader for declarative suite files.

pub mod adapters;
pub mod suite;

pub use adapters::{ExecutorConfig, ReqwestExecutor};
pub use suite::{Suite, SuiteError, SuiteFormat, load_suite};
