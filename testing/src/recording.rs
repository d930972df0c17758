//! Stand-ins for the store when testing orchestrators.

use remote_data_runtime::{Dispatch, DispatchFuture, StoreError, Watcher};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// A [`Dispatch`] implementation that records every action it receives.
///
/// Clones share the same record. With [`RecordingDispatcher::rejecting_after`]
/// it behaves like a store that starts shutting down after a number of
/// actions.
///
/// # Example
///
/// ```
/// use remote_data_runtime::Dispatch;
/// use remote_data_testing::RecordingDispatcher;
///
/// # tokio_test::block_on(async {
/// let dispatcher = RecordingDispatcher::new();
/// dispatcher.dispatch("hello").await.ok();
/// assert_eq!(dispatcher.actions(), vec!["hello"]);
/// # });
/// ```
#[derive(Debug)]
pub struct RecordingDispatcher<A> {
    actions: Arc<Mutex<Vec<A>>>,
    recorded: watch::Sender<usize>,
    reject_after: Option<usize>,
}

impl<A> RecordingDispatcher<A> {
    /// A dispatcher accepting every action
    #[must_use]
    pub fn new() -> Self {
        let (recorded, _) = watch::channel(0);
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            recorded,
            reject_after: None,
        }
    }

    /// A dispatcher that fails with [`StoreError::ShutdownInProgress`] once
    /// `limit` actions have been recorded
    #[must_use]
    pub fn rejecting_after(limit: usize) -> Self {
        Self {
            reject_after: Some(limit),
            ..Self::new()
        }
    }

    /// Number of recorded actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` actions are recorded
    ///
    /// Returns `false` if `timeout` elapses first.
    pub async fn wait_for_len(&self, count: usize, timeout: Duration) -> bool {
        let mut rx = self.recorded.subscribe();
        let reached = tokio::time::timeout(timeout, rx.wait_for(|recorded| *recorded >= count))
            .await
            .is_ok_and(|result| result.is_ok());
        reached
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<A>> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Clone> RecordingDispatcher<A> {
    /// Snapshot of the recorded actions, in dispatch order
    #[must_use]
    pub fn actions(&self) -> Vec<A> {
        self.lock().clone()
    }
}

impl<A> Default for RecordingDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for RecordingDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
            recorded: self.recorded.clone(),
            reject_after: self.reject_after,
        }
    }
}

impl<A: Send + 'static> Dispatch<A> for RecordingDispatcher<A> {
    fn dispatch(&self, action: A) -> DispatchFuture<'_> {
        let result = {
            let mut actions = self.lock();
            if self.reject_after.is_some_and(|limit| actions.len() >= limit) {
                Err(StoreError::ShutdownInProgress)
            } else {
                actions.push(action);
                let len = actions.len();
                self.recorded.send_replace(len);
                Ok(())
            }
        };
        Box::pin(async move { result })
    }
}

/// Observes a store's action stream from a test.
///
/// Wraps a [`Watcher`] with timeouts so a test fails instead of hanging when
/// an expected action never arrives.
#[derive(Debug)]
pub struct ActionObserver<A> {
    watcher: Watcher<A>,
    timeout: Duration,
}

impl<A> ActionObserver<A> {
    /// Observe `watcher`, waiting at most one second per action
    #[must_use]
    pub const fn new(watcher: Watcher<A>) -> Self {
        Self {
            watcher,
            timeout: Duration::from_secs(1),
        }
    }

    /// Change the per-action timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The next action, or `None` on timeout or closed stream
    pub async fn next(&mut self) -> Option<A> {
        tokio::time::timeout(self.timeout, self.watcher.next())
            .await
            .ok()
            .flatten()
    }

    /// Collect actions up to and including the first one matching `predicate`
    ///
    /// Returns `None` if the matching action does not arrive in time.
    pub async fn collect_until<F>(&mut self, predicate: F) -> Option<Vec<A>>
    where
        F: Fn(&A) -> bool,
    {
        let mut seen = Vec::new();
        loop {
            let action = self.next().await?;
            let done = predicate(&action);
            seen.push(action);
            if done {
                return Some(seen);
            }
        }
    }

    /// Everything already queued, without waiting
    pub fn drain(&mut self) -> Vec<A> {
        std::iter::from_fn(|| self.watcher.try_next()).collect()
    }
}
