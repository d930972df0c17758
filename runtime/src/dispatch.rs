//! The dispatch seam between orchestrators and stores.
//!
//! Orchestrators emit actions through [`Dispatch`] instead of holding a
//! concrete [`Store`](crate::Store). A feature orchestrator speaks its own
//! action type; [`Scoped`] lifts it into the application's action envelope, and
//! tests substitute a recording dispatcher.

use crate::StoreError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Dispatch::dispatch`]
pub type DispatchFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

/// Something actions can be sent into.
///
/// `dispatch` resolves once the action has been reduced, so a caller that
/// awaits it knows the state already reflects the action.
pub trait Dispatch<A>: Send + Sync {
    /// Send an action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] when the target no longer
    /// accepts actions.
    fn dispatch(&self, action: A) -> DispatchFuture<'_>;
}

impl<A, D> Dispatch<A> for Arc<D>
where
    D: Dispatch<A> + ?Sized,
{
    fn dispatch(&self, action: A) -> DispatchFuture<'_> {
        (**self).dispatch(action)
    }
}

/// A dispatcher that embeds child actions into a parent action type.
///
/// Created by [`Store::scope`](crate::Store::scope) or [`Scoped::new`].
pub struct Scoped<D, A, B> {
    inner: D,
    embed: fn(B) -> A,
}

impl<D, A, B> Scoped<D, A, B> {
    /// Wrap `inner` so that it accepts `B` actions
    #[must_use]
    pub const fn new(inner: D, embed: fn(B) -> A) -> Self {
        Self { inner, embed }
    }
}

impl<D: Clone, A, B> Clone for Scoped<D, A, B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            embed: self.embed,
        }
    }
}

impl<D, A, B> std::fmt::Debug for Scoped<D, A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoped").finish_non_exhaustive()
    }
}

impl<D, A, B> Dispatch<B> for Scoped<D, A, B>
where
    D: Dispatch<A>,
    A: 'static,
    B: 'static,
{
    fn dispatch(&self, action: B) -> DispatchFuture<'_> {
        self.inner.dispatch((self.embed)(action))
    }
}
