//! Integration tests for Counter with Store
//!
//! Clicks run through a real store; the total arrives through the fed back
//! effect and is reduced before the click's handle completes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use counter::{CounterAction, CounterReducer, CounterState, selectors};
use remote_data_runtime::{Store, StoreError};
use std::time::Duration;

type CounterStore = Store<CounterState, CounterAction, (), CounterReducer>;

fn store() -> CounterStore {
    Store::new(CounterState::default(), CounterReducer, ())
}

/// Send a click and wait for its tally to be reduced
async fn click(store: &CounterStore, action: CounterAction) {
    let mut handle = store.send(action).await.unwrap();
    tokio::time::timeout(Duration::from_secs(1), handle.wait())
        .await
        .expect("the total should be tallied");
}

#[tokio::test]
async fn test_increment_then_decrement() {
    let store = store();

    click(&store, CounterAction::Increment).await;
    click(&store, CounterAction::Decrement).await;

    assert_eq!(store.state(selectors::count).await, 0);
    assert_eq!(store.state(selectors::total_clicks).await, 2);
}

#[tokio::test]
async fn test_total_follows_the_click() {
    let store = store();
    let mut watcher = store.watch();

    click(&store, CounterAction::Increment).await;

    assert_eq!(watcher.next().await, Some(CounterAction::Increment));
    assert_eq!(watcher.try_next(), Some(CounterAction::IncrementTotalClicks));
    assert_eq!(watcher.try_next(), None);
}

#[tokio::test]
async fn test_concurrent_clicks_are_all_counted() {
    let store = store();

    let handles: Vec<_> = (0..10)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                let action = if n % 2 == 0 {
                    CounterAction::Increment
                } else {
                    CounterAction::Decrement
                };
                click(&store, action).await;
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let state = store.state(|s| *s).await;
    assert_eq!(
        state,
        CounterState {
            count: 0,
            total_clicks: 10
        }
    );
}

#[tokio::test]
async fn test_state_isolation() {
    let store1 = store();
    let store2 = store();

    click(&store1, CounterAction::Increment).await;
    click(&store1, CounterAction::Increment).await;
    click(&store2, CounterAction::Decrement).await;

    assert_eq!(store1.state(|s| *s).await, CounterState { count: 2, total_clicks: 2 });
    assert_eq!(store2.state(|s| *s).await, CounterState { count: -1, total_clicks: 1 });
}

#[tokio::test]
async fn test_tally_adds_no_further_actions() {
    let store = store();
    let mut watcher = store.watch();

    click(&store, CounterAction::IncrementTotalClicks).await;

    assert_eq!(watcher.next().await, Some(CounterAction::IncrementTotalClicks));
    assert_eq!(watcher.try_next(), None);
    assert_eq!(store.state(|s| *s).await, CounterState { count: 0, total_clicks: 1 });
}

#[tokio::test]
async fn test_shutdown_drops_pending_tally() {
    let store = store();
    store.send(CounterAction::Increment).await.unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(selectors::count).await, 1);
    assert!(matches!(
        store.send(CounterAction::Increment).await,
        Err(StoreError::ShutdownInProgress)
    ));
}
