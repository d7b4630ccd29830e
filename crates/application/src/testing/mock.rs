//! Scripted request executor for runner tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use routecheck_domain::{RequestParams, ResponseSpec};

use crate::ports::{ExecutorError, RequestExecutor};

/// Replays queued results and records every request it receives.
#[derive(Default)]
pub(crate) struct MockExecutor {
    results: Mutex<VecDeque<Result<ResponseSpec, ExecutorError>>>,
    requests: Mutex<Vec<(RequestParams, Option<Value>)>>,
}

#[allow(clippy::unwrap_used)]
impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, response: ResponseSpec) -> Self {
        self.results.lock().unwrap().push_back(Ok(response));
        self
    }

    pub(crate) fn fail(self, error: ExecutorError) -> Self {
        self.results.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<(RequestParams, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl RequestExecutor for MockExecutor {
    async fn execute(
        &self,
        params: &RequestParams,
        body: Option<&Value>,
    ) -> Result<ResponseSpec, ExecutorError> {
        self.requests
            .lock()
            .unwrap()
            .push((params.clone(), body.cloned()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExecutorError::Other("no scripted response".to_string())))
    }
}
