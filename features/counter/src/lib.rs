//! # Counter
//!
//! A click counter that also tallies how many times it was clicked.
//!
//! `Increment` and `Decrement` move the count and return an effect that
//! feeds one `IncrementTotalClicks` back into the store, so the total is
//! derived from the clicks rather than dispatched by callers.
//!
//! ## Example
//!
//! ```no_run
//! use counter::{CounterAction, CounterReducer, CounterState, selectors};
//! use remote_data_runtime::Store;
//!
//! # async fn example() -> Result<(), remote_data_runtime::StoreError> {
//! let store = Store::new(CounterState::default(), CounterReducer, ());
//!
//! store.send(CounterAction::Increment).await?.wait().await;
//! assert_eq!(store.state(selectors::count).await, 1);
//! assert_eq!(store.state(selectors::total_clicks).await, 1);
//! # Ok(())
//! # }
//! ```

use remote_data_core::{
    SmallVec, action::ActionName, action::Namespaced, async_effect, effect::Effect,
    reducer::Reducer, smallvec,
};
use serde::{Deserialize, Serialize};

/// Namespace of every counter action type
pub const NAMESPACE: &str = "containers/Counter";

/// Counter state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count value
    pub count: i64,
    /// Clicks on either button since start
    pub total_clicks: u64,
}

/// Counter actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAction {
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Record one more click
    IncrementTotalClicks,
}

impl CounterAction {
    /// Build a click from its short name
    ///
    /// `INCREMENT_TOTAL_CLICKS` is fed back by the reducer and cannot be
    /// dispatched directly.
    #[must_use]
    pub fn trigger_from_name(name: &str) -> Option<Self> {
        match name {
            "INCREMENT" => Some(Self::Increment),
            "DECREMENT" => Some(Self::Decrement),
            _ => None,
        }
    }
}

impl ActionName for CounterAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Increment => "INCREMENT",
            Self::Decrement => "DECREMENT",
            Self::IncrementTotalClicks => "INCREMENT_TOTAL_CLICKS",
        }
    }
}

impl Namespaced for CounterAction {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }
}

/// Counter reducer
///
/// Each click returns a future effect yielding `IncrementTotalClicks`; the
/// tally itself returns `Effect::None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CounterAction::Increment => {
                state.count = state.count.saturating_add(1);
            },
            CounterAction::Decrement => {
                state.count = state.count.saturating_sub(1);
            },
            CounterAction::IncrementTotalClicks => {
                state.total_clicks = state.total_clicks.saturating_add(1);
                return smallvec![Effect::None];
            },
        }

        let click = action.name();
        smallvec![async_effect! {
            tracing::debug!(click, "Click observed");
            metrics::counter!("counter.clicks.total").increment(1);
            Some(CounterAction::IncrementTotalClicks)
        }]
    }
}

/// Read-only projections of [`CounterState`]
pub mod selectors {
    use super::CounterState;

    /// Current count
    #[must_use]
    pub const fn count(state: &CounterState) -> i64 {
        state.count
    }

    /// Total clicks
    #[must_use]
    pub const fn total_clicks(state: &CounterState) -> u64 {
        state.total_clicks
    }
}
