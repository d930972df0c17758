//! Read-only projections of a [`Lifecycle`] for views.
//!
//! Feature crates compose these into their own selectors, e.g. a field of
//! [`response_data`].

use crate::error::ErrorRecord;
use crate::lifecycle::Lifecycle;
use serde_json::{Map, Value};

/// No request has been made yet
#[must_use]
pub const fn is_not_asked(state: &Lifecycle) -> bool {
    matches!(state, Lifecycle::NotAsked)
}

/// A request is in flight
#[must_use]
pub const fn is_loading(state: &Lifecycle) -> bool {
    matches!(state, Lifecycle::Loading)
}

/// The last request succeeded
#[must_use]
pub const fn is_success(state: &Lifecycle) -> bool {
    matches!(state, Lifecycle::Success { .. })
}

/// The last request failed
#[must_use]
pub const fn is_failure(state: &Lifecycle) -> bool {
    matches!(state, Lifecycle::Failure { .. })
}

/// The response payload, or an empty JSON object when there is none
#[must_use]
pub fn response_data(state: &Lifecycle) -> Value {
    match state {
        Lifecycle::Success { payload } => payload.clone(),
        _ => Value::Object(Map::new()),
    }
}

/// The recorded error, if the last request failed
#[must_use]
pub const fn error(state: &Lifecycle) -> Option<&ErrorRecord> {
    match state {
        Lifecycle::Failure { error } => Some(error),
        _ => None,
    }
}

/// The error message, or `""` when there is no error
#[must_use]
pub fn error_message(state: &Lifecycle) -> &str {
    error(state).map_or("", |error| error.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestConfig;
    use crate::error::CallError;
    use serde_json::json;

    fn failure() -> Lifecycle {
        Lifecycle::Failure {
            error: ErrorRecord::from_call_error(
                &CallError::Transport("connection refused".into()),
                &RequestConfig::get("https://example.com"),
            ),
        }
    }

    #[test]
    fn test_exactly_one_status_flag() {
        let states = [
            Lifecycle::NotAsked,
            Lifecycle::Loading,
            Lifecycle::Success { payload: json!(1) },
            failure(),
        ];

        for state in &states {
            let flags = [
                is_not_asked(state),
                is_loading(state),
                is_success(state),
                is_failure(state),
            ];
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1, "{state:?}");
        }
    }

    #[test]
    fn test_response_data_defaults_to_empty_object() {
        assert_eq!(response_data(&Lifecycle::NotAsked), json!({}));
        assert_eq!(response_data(&Lifecycle::Loading), json!({}));
        assert_eq!(response_data(&failure()), json!({}));
        assert_eq!(
            response_data(&Lifecycle::Success {
                payload: json!({ "data": [] })
            }),
            json!({ "data": [] })
        );
    }

    #[test]
    fn test_error_selectors() {
        assert_eq!(error_message(&Lifecycle::Loading), "");
        assert!(error(&Lifecycle::Loading).is_none());

        let state = failure();
        assert_eq!(error_message(&state), "Network error: connection refused");
        assert_eq!(error(&state).map(|e| e.url.as_str()), Some("https://example.com"));
    }
}
