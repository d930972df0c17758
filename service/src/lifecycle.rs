//! The lifecycle slice a request service keeps in the store.

use crate::error::ErrorRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a service's request currently stands.
///
/// Exactly one variant is active. A payload or error only exists in the
/// variant that owns it, so moving to `Loading` drops the previous result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lifecycle {
    /// No request has been made yet
    #[default]
    NotAsked,
    /// A request is in flight
    Loading,
    /// The last request succeeded
    Success {
        /// Raw response body
        payload: Value,
    },
    /// The last request failed
    Failure {
        /// What went wrong
        error: ErrorRecord,
    },
}

impl Lifecycle {
    /// Status name of the active variant, e.g. `LOADING`
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::NotAsked => "NOT_ASKED",
            Self::Loading => "LOADING",
            Self::Success { .. } => "SUCCESS",
            Self::Failure { .. } => "FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_not_asked() {
        assert_eq!(Lifecycle::default(), Lifecycle::NotAsked);
        assert_eq!(Lifecycle::default().status(), "NOT_ASKED");
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let state = Lifecycle::Success {
            payload: json!({ "data": { "image_url": "u" } }),
        };

        assert_eq!(
            serde_json::to_value(&state).ok(),
            Some(json!({ "status": "SUCCESS", "payload": { "data": { "image_url": "u" } } }))
        );
        assert_eq!(
            serde_json::to_value(Lifecycle::Loading).ok(),
            Some(json!({ "status": "LOADING" }))
        );
    }
}
