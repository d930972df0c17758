//! # Remote Data Core
//!
//! Core traits and types for reducer-driven request lifecycles.
//!
//! This crate provides the pure half of the architecture: state is folded by
//! reducers, side effects are returned as descriptions, and every action has a
//! namespaced type so independent features can share one action stream.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature slice
//! - **Action**: All possible inputs to a reducer (triggers and lifecycle events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies
//!
//! ## Example
//!
//! ```
//! use remote_data_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct ClickState {
//!     clicks: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ClickAction {
//!     Clicked,
//! }
//!
//! struct ClickReducer;
//!
//! impl Reducer for ClickReducer {
//!     type State = ClickState;
//!     type Action = ClickAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ClickState,
//!         action: ClickAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ClickAction>; 4]> {
//!         match action {
//!             ClickAction::Clicked => state.clicks += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = ClickState::default();
//! let _ = ClickReducer.reduce(&mut state, ClickAction::Clicked, &());
//! assert_eq!(state.clicks, 1);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Action naming: namespaced action types shared across features
pub mod action;

/// Reducer composition utilities
pub mod composition;

/// Declarative macros for effect construction
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// Actions the reducer does not own must leave `state` untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Whether this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Transform the action this effect feeds back
        ///
        /// Used when a child reducer runs inside a parent: the child's effects
        /// must produce the parent's action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: FnOnce(Action) -> B + Send + 'static,
            Action: Send + 'static,
            B: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            }
        }
    }
}
