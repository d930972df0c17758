//! Folding lifecycle actions into the slice.

use crate::action::ServiceAction;
use crate::lifecycle::Lifecycle;
use remote_data_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Reducer for a service's [`Lifecycle`] slice.
///
/// Pure and total. `MakeRequest` leaves the slice unchanged: the orchestrator
/// consumes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleReducer;

impl Reducer for LifecycleReducer {
    type State = Lifecycle;
    type Action = ServiceAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ServiceAction::MakeRequest { .. } => {},
            ServiceAction::NotAsked => *state = Lifecycle::NotAsked,
            ServiceAction::Loading => *state = Lifecycle::Loading,
            ServiceAction::Success { response_data } => {
                *state = Lifecycle::Success {
                    payload: response_data,
                };
            },
            ServiceAction::Failure { error } => *state = Lifecycle::Failure { error },
        }

        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestConfig;
    use crate::error::{CallError, ErrorRecord};
    use proptest::prelude::*;
    use remote_data_testing::{ReducerTest, assertions};
    use serde_json::{Value, json};

    fn error_record(status: u16) -> ErrorRecord {
        ErrorRecord::from_call_error(
            &CallError::Status {
                status,
                body: json!({}),
            },
            &RequestConfig::get("https://example.com"),
        )
    }

    fn reduce(state: &Lifecycle, action: ServiceAction) -> Lifecycle {
        let mut next = state.clone();
        let _ = LifecycleReducer.reduce(&mut next, action, &());
        next
    }

    #[test]
    fn test_loading_from_not_asked() {
        ReducerTest::new(LifecycleReducer)
            .with_env(())
            .given_state(Lifecycle::NotAsked)
            .when_action(ServiceAction::Loading)
            .then_state(|state| assert_eq!(*state, Lifecycle::Loading))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_success_stores_payload() {
        ReducerTest::new(LifecycleReducer)
            .with_env(())
            .given_state(Lifecycle::Loading)
            .when_action(ServiceAction::Success {
                response_data: json!({ "data": { "image_url": "u" } }),
            })
            .then_state(|state| {
                assert_eq!(
                    *state,
                    Lifecycle::Success {
                        payload: json!({ "data": { "image_url": "u" } })
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_loading_drops_previous_error() {
        ReducerTest::new(LifecycleReducer)
            .with_env(())
            .given_state(Lifecycle::Failure {
                error: error_record(500),
            })
            .when_action(ServiceAction::Loading)
            .then_state(|state| assert_eq!(*state, Lifecycle::Loading))
            .run();
    }

    #[test]
    fn test_failure_replaces_success_without_residue() {
        ReducerTest::new(LifecycleReducer)
            .with_env(())
            .given_state(Lifecycle::Success {
                payload: json!({ "data": 1 }),
            })
            .when_action(ServiceAction::Failure {
                error: error_record(404),
            })
            .then_state(|state| {
                assert_eq!(
                    *state,
                    Lifecycle::Failure {
                        error: error_record(404)
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_make_request_is_identity() {
        let state = Lifecycle::Success {
            payload: json!([1, 2, 3]),
        };
        assert_eq!(reduce(&state, ServiceAction::make_request()), state);
    }

    #[test]
    fn test_full_cycle() {
        ReducerTest::new(LifecycleReducer)
            .with_env(())
            .given_state(Lifecycle::default())
            .when_actions([
                ServiceAction::NotAsked,
                ServiceAction::make_request(),
                ServiceAction::Loading,
                ServiceAction::Success {
                    response_data: json!("ok"),
                },
            ])
            .then_state(|state| {
                assert_eq!(
                    *state,
                    Lifecycle::Success {
                        payload: json!("ok")
                    }
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    fn arb_payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,12}".prop_map(Value::from),
            ("[a-z]{1,6}", "[a-z]{0,6}").prop_map(|(k, v)| json!({ k: v })),
        ]
    }

    fn arb_state() -> impl Strategy<Value = Lifecycle> {
        prop_oneof![
            Just(Lifecycle::NotAsked),
            Just(Lifecycle::Loading),
            arb_payload().prop_map(|payload| Lifecycle::Success { payload }),
            (400_u16..600).prop_map(|status| Lifecycle::Failure {
                error: error_record(status)
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_make_request_never_changes_state(state in arb_state()) {
            prop_assert_eq!(reduce(&state, ServiceAction::make_request()), state);
        }

        #[test]
        fn prop_success_overwrites_any_state(state in arb_state(), payload in arb_payload()) {
            let next = reduce(&state, ServiceAction::Success { response_data: payload.clone() });
            prop_assert_eq!(next, Lifecycle::Success { payload });
        }

        #[test]
        fn prop_failure_overwrites_any_state(state in arb_state(), status in 400_u16..600) {
            let next = reduce(&state, ServiceAction::Failure { error: error_record(status) });
            prop_assert_eq!(next, Lifecycle::Failure { error: error_record(status) });
        }

        #[test]
        fn prop_not_asked_and_loading_are_idempotent(state in arb_state()) {
            let once = reduce(&state, ServiceAction::Loading);
            prop_assert_eq!(reduce(&once, ServiceAction::Loading), once);

            let once = reduce(&state, ServiceAction::NotAsked);
            prop_assert_eq!(reduce(&once, ServiceAction::NotAsked), once);
        }
    }
}
