//! Structural mismatch reporting

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One path whose value did not satisfy its expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Dotted path into the document (`$` for the root).
    pub path: String,
    /// What went wrong at that path.
    pub reason: String,
}

impl Mismatch {
    /// Creates a mismatch.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// A document that does not match its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} structural mismatch(es):{}", .mismatches.len(), render(.mismatches))]
pub struct ShapeMismatch {
    /// Every differing path, in expectation order.
    pub mismatches: Vec<Mismatch>,
}

impl ShapeMismatch {
    /// Returns the first reported difference.
    #[must_use]
    pub fn first(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }
}

fn render(mismatches: &[Mismatch]) -> String {
    mismatches.iter().map(|m| format!("\n  {m}")).collect()
}
