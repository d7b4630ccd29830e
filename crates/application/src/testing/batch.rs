//! Batch runner.
//!
//! Runs route tests one at a time in declared order and stops at the first
//! failure. If any test is marked `only`, just those tests run.

use std::sync::Arc;

use tracing::{debug, info};

use routecheck_domain::{RouteTest, TestOutcome};

use crate::error::BatchError;
use crate::ports::RequestExecutor;
use crate::testing::TestRunner;

/// The tests a batch will run.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Selected tests, in their original relative order.
    pub tests: Vec<&'a RouteTest>,
    /// How many tests the `only` flag left out.
    pub excluded: usize,
}

/// Applies the `only` filter.
///
/// When at least one test is marked `only`, the selection is exactly those
/// tests; otherwise it is every test.
#[must_use]
pub fn select_tests(tests: &[RouteTest]) -> Selection<'_> {
    let only: Vec<&RouteTest> = tests.iter().filter(|t| t.only).collect();
    if only.is_empty() {
        Selection {
            tests: tests.iter().collect(),
            excluded: 0,
        }
    } else {
        Selection {
            excluded: tests.len() - only.len(),
            tests: only,
        }
    }
}

/// Summary of a batch in which every selected test passed.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Outcomes of the selected tests, in run order.
    pub outcomes: Vec<TestOutcome>,
    /// How many tests the `only` flag left out.
    pub excluded: usize,
}

impl BatchReport {
    /// Number of tests that ran.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs a list of route tests sequentially, failing fast.
pub struct BatchRunner<E: RequestExecutor> {
    runner: TestRunner<E>,
}

impl<E: RequestExecutor> BatchRunner<E> {
    /// Creates a batch runner using the given executor.
    pub const fn new(executor: Arc<E>) -> Self {
        Self {
            runner: TestRunner::new(executor),
        }
    }

    /// Runs the selected tests in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure, tagged with the test's position among the
    /// selected tests and its name.
    pub async fn run(&self, tests: &[RouteTest]) -> Result<BatchReport, BatchError> {
        let selection = select_tests(tests);
        if selection.excluded > 0 {
            info!(
                "Excluding {} tests because of Only flag",
                selection.excluded
            );
        }

        let mut outcomes = Vec::with_capacity(selection.tests.len());
        for (index, test) in selection.tests.into_iter().enumerate() {
            debug!(index, name = test.name.as_deref().unwrap_or_default(), "running route test");
            let outcome = self.runner.run(test).await.map_err(|source| BatchError {
                index,
                name: test.name.clone(),
                source,
            })?;
            outcomes.push(outcome);
        }

        Ok(BatchReport {
            outcomes,
            excluded: selection.excluded,
        })
    }
}
