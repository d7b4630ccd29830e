//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the test runners and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod request_executor;

pub use request_executor::{ExecutorError, RequestExecutor};
