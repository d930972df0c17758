//! The action vocabulary shared by every request service.

use crate::config::ConfigOverrides;
use crate::error::ErrorRecord;
use remote_data_core::action::ActionName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions of a request service.
///
/// `MakeRequest` is the trigger other features dispatch. The remaining four
/// are emitted by the orchestrator and folded by
/// [`LifecycleReducer`](crate::LifecycleReducer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceAction {
    /// Ask for a request with the given overrides
    MakeRequest {
        /// Merged onto the base configuration for this request only
        #[serde(default)]
        overrides: ConfigOverrides,
    },
    /// Reset to the initial status
    NotAsked,
    /// A request started
    Loading,
    /// A request completed
    Success {
        /// Raw response body
        response_data: Value,
    },
    /// A request failed
    Failure {
        /// Normalized error
        error: ErrorRecord,
    },
}

impl ServiceAction {
    /// A trigger using the base configuration unchanged
    #[must_use]
    pub fn make_request() -> Self {
        Self::MakeRequest {
            overrides: ConfigOverrides::default(),
        }
    }

    /// The overrides of a `MakeRequest`, `None` for any other action
    #[must_use]
    pub fn into_trigger(self) -> Option<ConfigOverrides> {
        match self {
            Self::MakeRequest { overrides } => Some(overrides),
            _ => None,
        }
    }

    /// Build a trigger from its short name
    ///
    /// Only `MAKE_REQUEST` can be dispatched from outside; the lifecycle
    /// actions belong to the orchestrator.
    #[must_use]
    pub fn trigger_from_name(name: &str) -> Option<Self> {
        (name == "MAKE_REQUEST").then(Self::make_request)
    }
}

impl ActionName for ServiceAction {
    fn name(&self) -> &'static str {
        match self {
            Self::MakeRequest { .. } => "MAKE_REQUEST",
            Self::NotAsked => "NOT_ASKED",
            Self::Loading => "LOADING",
            Self::Success { .. } => "SUCCESS",
            Self::Failure { .. } => "FAILURE",
        }
    }
}
