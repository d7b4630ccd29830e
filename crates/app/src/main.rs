//! Routecheck - Main Entry Point
//!
//! Loads a suite file, runs its route tests in order against the live
//! service and exits non-zero at the first failure.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use routecheck_application::BatchRunner;
use routecheck_infrastructure::{ExecutorConfig, ReqwestExecutor, load_suite};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::parse();

    let mut suite = load_suite(&settings.suite).await?;
    if let Some(base_url) = settings.base_url {
        suite = suite.with_base_url(base_url);
    }
    let tests = suite.into_tests();

    let mut executor_config = ExecutorConfig::default();
    if let Some(timeout) = settings.timeout {
        executor_config.timeout = timeout;
    }
    let executor = Arc::new(ReqwestExecutor::with_config(executor_config)?);

    tracing::info!(
        suite = %settings.suite.display(),
        tests = tests.len(),
        "Starting Routecheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    match BatchRunner::new(executor).run(&tests).await {
        Ok(report) => {
            tracing::info!(
                executed = report.executed(),
                excluded = report.excluded,
                "all route tests passed"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("route test failed: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
