//! The external call seam and its `reqwest` implementation.

use crate::config::{HttpMethod, RequestConfig};
use crate::error::CallError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`HttpCall::call`]
pub type CallFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, CallError>> + Send + 'a>>;

/// Performs one request described by a [`RequestConfig`].
///
/// Implementations enforce `config.timeout` themselves; the orchestrator
/// never cancels a call.
pub trait HttpCall: Send + Sync {
    /// Perform the request and return the decoded response body
    ///
    /// # Errors
    ///
    /// Returns a [`CallError`] for transport failures, non-success statuses,
    /// elapsed timeouts and undecodable bodies.
    fn call(&self, config: RequestConfig) -> CallFuture<'_>;
}

impl<C> HttpCall for Arc<C>
where
    C: HttpCall + ?Sized,
{
    fn call(&self, config: RequestConfig) -> CallFuture<'_> {
        (**self).call(config)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// [`HttpCall`] backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestCall {
    client: reqwest::Client,
}

impl ReqwestCall {
    /// Create a call with a default client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a call with an existing client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn perform(&self, config: RequestConfig) -> Result<Value, CallError> {
        let mut request = self
            .client
            .request(config.method.into(), &config.url)
            .query(&query_pairs(&config));

        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&e, &config))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, &config))?;

        if !status.is_success() {
            return Err(CallError::Status {
                status: status.as_u16(),
                body: decode_body(&bytes).unwrap_or(Value::Null),
            });
        }

        decode_body(&bytes)
    }
}

impl HttpCall for ReqwestCall {
    fn call(&self, config: RequestConfig) -> CallFuture<'_> {
        Box::pin(self.perform(config))
    }
}

/// Query parameters as strings; JSON strings are sent without quotes
fn query_pairs(config: &RequestConfig) -> Vec<(&str, String)> {
    config
        .params
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.as_str(), value)
        })
        .collect()
}

fn transport_error(error: &reqwest::Error, config: &RequestConfig) -> CallError {
    if error.is_timeout() {
        CallError::Timeout(config.timeout)
    } else {
        CallError::Transport(error.to_string())
    }
}

/// JSON when the body parses, a JSON string otherwise, `null` when empty
fn decode_body(bytes: &[u8]) -> Result<Value, CallError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(value) = serde_json::from_slice(bytes) {
        return Ok(value);
    }
    std::str::from_utf8(bytes)
        .map(|text| Value::String(text.to_string()))
        .map_err(|e| CallError::Decode(e.to_string()))
}
