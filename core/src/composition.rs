//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Run a feature reducer on its own slice of a larger
//!   state, for the subset of a larger action type that belongs to it
//!
//! Together they build an application reducer where several independent
//! slices share one action stream. A scoped reducer ignores every action it
//! cannot extract, so one feature's actions never touch another feature's
//! slice.
//!
//! # Example
//!
//! ```
//! use remote_data_core::composition::{combine_reducers, scope_reducer};
//! use remote_data_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     value: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Add(i32),
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Tally, action: TallyAction, _env: &()) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         let TallyAction::Add(n) = action;
//!         state.value += n;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     left: Tally,
//!     right: Tally,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Left(TallyAction),
//!     Right(TallyAction),
//! }
//!
//! let app = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         TallyReducer,
//!         |s: &mut AppState| &mut s.left,
//!         |a: AppAction| match a {
//!             AppAction::Left(a) => Some(a),
//!             AppAction::Right(_) => None,
//!         },
//!         AppAction::Left,
//!     )),
//!     Box::new(scope_reducer(
//!         TallyReducer,
//!         |s: &mut AppState| &mut s.right,
//!         |a: AppAction| match a {
//!             AppAction::Right(a) => Some(a),
//!             AppAction::Left(_) => None,
//!         },
//!         AppAction::Right,
//!     )),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = app.reduce(&mut state, AppAction::Left(TallyAction::Add(2)), &());
//! assert_eq!(state.left.value, 2);
//! assert_eq!(state.right.value, 0);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to one slice of a larger state and action space.
///
/// - `slice` focuses the parent state on the child's slice
/// - `extract` returns the child action when the parent action carries one
/// - `embed` lifts actions fed back by the child's effects into the parent
///
/// Parent actions that `extract` rejects leave the state untouched and
/// produce no effects.
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        slice,
        extract,
        embed,
    }
}

/// A reducer focused on a slice of state and a subset of actions.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        self.reducer
            .reduce((self.slice)(state), action, env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default, Debug, PartialEq)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => state.counter += 1,
                TestAction::Decrement => state.counter -= 1,
                TestAction::SetName(_) => {},
            }
            smallvec![Effect::None]
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);

        let mut state = TestState::default();

        let _ = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        let effects = combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
        assert_eq!(effects.len(), 2);
    }

    #[derive(Clone, Debug)]
    enum ParentAction {
        Test(TestAction),
        Ping,
    }

    #[derive(Clone, Default, Debug)]
    struct ParentState {
        test: TestState,
        other: String,
    }

    fn scoped() -> ScopedReducer<ParentState, TestState, ParentAction, TestAction, (), CounterReducer>
    {
        scope_reducer(
            CounterReducer,
            |parent: &mut ParentState| &mut parent.test,
            |action| match action {
                ParentAction::Test(action) => Some(action),
                ParentAction::Ping => None,
            },
            ParentAction::Test,
        )
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scoped();
        let mut state = ParentState {
            test: TestState { counter: 5, name: String::new() },
            other: "test".to_string(),
        };

        let _ = scoped.reduce(&mut state, ParentAction::Test(TestAction::Increment), &());
        assert_eq!(state.test.counter, 6);
        assert_eq!(state.other, "test");
    }

    #[test]
    fn test_scope_reducer_ignores_foreign_actions() {
        let scoped = scoped();
        let mut state = ParentState::default();
        let before = state.test.clone();

        let effects = scoped.reduce(&mut state, ParentAction::Ping, &());

        assert_eq!(state.test, before);
        assert!(effects.is_empty());
    }

    struct FeedbackReducer;

    impl Reducer for FeedbackReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            _state: &mut Self::State,
            _action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            smallvec![crate::async_effect! { Some(TestAction::Increment) }]
        }
    }

    #[test]
    fn test_scope_reducer_embeds_effect_actions() {
        let scoped = scope_reducer(
            FeedbackReducer,
            |parent: &mut ParentState| &mut parent.test,
            |action| match action {
                ParentAction::Test(action) => Some(action),
                ParentAction::Ping => None,
            },
            ParentAction::Test,
        );
        let mut state = ParentState::default();

        let mut effects = scoped.reduce(&mut state, ParentAction::Test(TestAction::Decrement), &());

        assert_eq!(effects.len(), 1);
        let Some(Effect::Future(fut)) = effects.pop() else {
            unreachable!("the child's future effect is kept");
        };
        assert!(matches!(
            tokio_test::block_on(fut),
            Some(ParentAction::Test(TestAction::Increment))
        ));
    }
}
