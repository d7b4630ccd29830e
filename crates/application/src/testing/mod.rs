//! Route test execution.
//!
//! [`TestRunner`] runs one descriptor through its fixed sequence of checks;
//! [`BatchRunner`] runs a list of descriptors in order, honouring the
//! `only` flag and stopping at the first failure.

mod batch;
mod context;
mod runner;

#[cfg(test)]
pub(crate) mod mock;

pub use batch::{BatchReport, BatchRunner, Selection, select_tests};
pub use context::DiagnosticContext;
pub use runner::TestRunner;
