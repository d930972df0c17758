//! # Remote Data Service
//!
//! Request services: a reusable request lifecycle
//! (`NotAsked → Loading → Success | Failure`) kept in the store and driven by
//! a long-lived orchestrator.
//!
//! A service instance is a namespace plus a base [`RequestConfig`]. Any
//! feature starts a request by dispatching [`ServiceAction::MakeRequest`];
//! the [`RequestOrchestrator`] watching the action stream performs the call
//! and emits lifecycle actions; [`LifecycleReducer`] folds them into the
//! service's [`Lifecycle`] slice; views read it through [`selectors`].
//!
//! Response data and errors are stored as received (errors normalized into an
//! [`ErrorRecord`]). Interpretation belongs in selectors.
//!
//! ## Example
//!
//! ```
//! use remote_data_core::reducer::Reducer;
//! use remote_data_service::{selectors, Lifecycle, LifecycleReducer, ServiceAction};
//! use serde_json::json;
//!
//! let mut state = Lifecycle::default();
//! let _ = LifecycleReducer.reduce(&mut state, ServiceAction::Loading, &());
//! assert!(selectors::is_loading(&state));
//!
//! let _ = LifecycleReducer.reduce(
//!     &mut state,
//!     ServiceAction::Success { response_data: json!({ "data": 1 }) },
//!     &(),
//! );
//! assert_eq!(selectors::response_data(&state), json!({ "data": 1 }));
//! ```

/// Service action vocabulary
pub mod action;

/// Request configuration and overrides
pub mod config;

/// Call errors and error records
pub mod error;

/// External call seam
pub mod http;

/// Lifecycle slice
pub mod lifecycle;

/// Scripted calls for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

/// Trigger-watching orchestrator
pub mod orchestrator;

/// Lifecycle reducer
pub mod reducer;

/// Derived view selectors
pub mod selectors;

pub use action::ServiceAction;
pub use config::{ConfigOverrides, HttpMethod, RequestConfig};
pub use error::{CallError, ErrorKind, ErrorRecord};
pub use http::{CallFuture, HttpCall, ReqwestCall};
pub use lifecycle::Lifecycle;
pub use orchestrator::RequestOrchestrator;
pub use reducer::LifecycleReducer;
