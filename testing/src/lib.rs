//! # Remote Data Testing
//!
//! Testing utilities for reducers, stores and orchestrators.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`RecordingDispatcher`]: A dispatch target that records actions
//! - [`ActionObserver`]: Timed observation of a store's action stream
//!
//! ## Example
//!
//! ```ignore
//! use remote_data_testing::{ActionObserver, RecordingDispatcher};
//!
//! #[tokio::test]
//! async fn test_orchestrator_flow() {
//!     let dispatcher = RecordingDispatcher::new();
//!     orchestrator.request_flow(config, &dispatcher).await;
//!
//!     assert_eq!(dispatcher.actions(), vec![ServiceAction::Loading, success]);
//! }
//! ```


/// Recording dispatchers and action observers
pub mod recording;

// Re-export commonly used items
pub use recording::{ActionObserver, RecordingDispatcher};
pub use reducer_test::{ReducerTest, assertions};
