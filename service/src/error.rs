//! Call errors and their normalized, storable form.

use crate::config::{HttpMethod, RequestConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by an external call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as JSON when possible
        body: Value,
    },

    /// The timeout elapsed; `None` when it came from the client rather
    /// than the request
    #[error("{}", timeout_message(*.0))]
    Timeout(Option<Duration>),

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

fn timeout_message(timeout: Option<Duration>) -> String {
    timeout.map_or_else(
        || "timeout exceeded".to_string(),
        |timeout| format!("timeout of {}ms exceeded", timeout.as_millis()),
    )
}

/// Kind of failure recorded in an [`ErrorRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`CallError::Transport`]
    TransportError,
    /// See [`CallError::Status`]
    HttpStatusError,
    /// See [`CallError::Timeout`]
    TimeoutError,
    /// See [`CallError::Decode`]
    DecodeError,
}

/// A failed call, flattened into plain data for the store.
///
/// Carries the request it came from so a view can explain what failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Failure kind
    pub name: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// HTTP status, for status errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response body, for status errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Method of the failed request
    pub method: HttpMethod,
    /// URL of the failed request
    pub url: String,
}

impl ErrorRecord {
    /// Normalize a call error raised while performing `config`
    #[must_use]
    pub fn from_call_error(error: &CallError, config: &RequestConfig) -> Self {
        let (name, status, body) = match error {
            CallError::Transport(_) => (ErrorKind::TransportError, None, None),
            CallError::Status { status, body } => {
                (ErrorKind::HttpStatusError, Some(*status), Some(body.clone()))
            },
            CallError::Timeout(_) => (ErrorKind::TimeoutError, None, None),
            CallError::Decode(_) => (ErrorKind::DecodeError, None, None),
        };

        Self {
            name,
            message: error.to_string(),
            status,
            body,
            method: config.method,
            url: config.url.clone(),
        }
    }
}
