//! Lossless action queues for long-lived orchestrators.
//!
//! A [`Watcher`] is an unbounded queue fed by the store inside the same
//! critical section that runs the reducer, so every watcher sees every action
//! exactly once and in reduction order.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Ordered queue of every action reduced by a store after registration.
///
/// Created by [`Store::watch`](crate::Store::watch). Dropping the watcher
/// unregisters it on the next action.
#[derive(Debug)]
pub struct Watcher<A> {
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A> Watcher<A> {
    /// Wait for the next action
    ///
    /// Returns `None` once the store (and every clone of it) is dropped and
    /// the queue is drained.
    pub async fn next(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Wait for the next action that `take` accepts
    ///
    /// Actions rejected by `take` are consumed and discarded. Actions not yet
    /// received stay queued, so triggers arriving while the caller is busy are
    /// delivered later in order.
    pub async fn take<T, F>(&mut self, mut take: F) -> Option<T>
    where
        F: FnMut(A) -> Option<T>,
    {
        while let Some(action) = self.rx.recv().await {
            if let Some(taken) = take(action) {
                return Some(taken);
            }
        }
        None
    }

    /// Pop an already queued action without waiting
    pub fn try_next(&mut self) -> Option<A> {
        self.rx.try_recv().ok()
    }
}

/// Store-side registry of watcher queues.
pub(crate) struct WatcherRegistry<A> {
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<A>>>>,
}

impl<A: Clone> WatcherRegistry<A> {
    pub(crate) fn new() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn register(&self) -> Watcher<A> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Watcher { rx }
    }

    /// Forward an action to every live watcher, pruning closed ones
    pub(crate) fn forward(&self, action: &A) {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|tx| tx.send(action.clone()).is_ok());
    }

    pub(crate) fn len(&self) -> usize {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<A> Clone for WatcherRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            senders: Arc::clone(&self.senders),
        }
    }
}
