//! Scripted [`HttpCall`] for tests.
//!
//! # Example
//!
//! ```
//! use remote_data_service::mocks::MockCall;
//! use remote_data_service::{HttpCall, RequestConfig};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let call = MockCall::new().succeed(json!({ "data": 1 }));
//! let body = call.call(RequestConfig::get("https://example.com")).await;
//!
//! assert_eq!(body.ok(), Some(json!({ "data": 1 })));
//! assert_eq!(call.calls().len(), 1);
//! # });
//! ```

use crate::config::RequestConfig;
use crate::error::CallError;
use crate::http::{CallFuture, HttpCall};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;

/// An [`HttpCall`] answering from a script.
///
/// Responses are returned in the order they were scripted; once the script is
/// exhausted every call succeeds with an empty object. Each call's
/// configuration is recorded. A gated mock holds every call until the test
/// releases it with [`MockCall::release`].
#[derive(Debug, Default)]
pub struct MockCall {
    script: Mutex<VecDeque<Result<Value, CallError>>>,
    calls: Mutex<Vec<RequestConfig>>,
    gate: Option<Arc<Semaphore>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockCall {
    /// A mock that answers immediately
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose calls wait until released
    #[must_use]
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// Script a successful response
    #[must_use]
    pub fn succeed(self, body: Value) -> Self {
        self.push(Ok(body));
        self
    }

    /// Script a failure
    #[must_use]
    pub fn fail(self, error: CallError) -> Self {
        self.push(Err(error));
        self
    }

    /// Script a response on a shared mock
    pub fn push(&self, response: Result<Value, CallError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Let `count` waiting or future calls of a gated mock complete
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Configurations of every call so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<RequestConfig> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Largest number of calls that were in flight at the same time
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, config: RequestConfig) -> Result<Value, CallError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(config);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let response = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Map::new())));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

impl HttpCall for MockCall {
    fn call(&self, config: RequestConfig) -> CallFuture<'_> {
        Box::pin(self.respond(config))
    }
}
