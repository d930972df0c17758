//! The long-lived task that turns triggers into request flows.

use crate::action::ServiceAction;
use crate::config::{ConfigOverrides, RequestConfig};
use crate::error::ErrorRecord;
use crate::http::HttpCall;
use remote_data_runtime::{Dispatch, StoreError, Watcher};
use std::time::Instant;

/// Watches the action stream for a service's triggers and performs one
/// request per trigger, one at a time.
///
/// # Example
///
/// ```ignore
/// let orchestrator = RequestOrchestrator::new(NAMESPACE, base_config, ReqwestCall::new());
/// let watcher = store.watch();
/// let dispatch = store.scope(AppAction::GiphyCats);
///
/// tokio::spawn(async move {
///     orchestrator.run(watcher, extract_trigger, &dispatch).await;
/// });
/// ```
#[derive(Debug)]
pub struct RequestOrchestrator<C> {
    namespace: &'static str,
    base: RequestConfig,
    client: C,
}

impl<C: HttpCall> RequestOrchestrator<C> {
    /// Create an orchestrator for the service living in `namespace`
    #[must_use]
    pub const fn new(namespace: &'static str, base: RequestConfig, client: C) -> Self {
        Self {
            namespace,
            base,
            client,
        }
    }

    /// Namespace used in logs and metrics
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The base configuration every trigger is merged onto
    #[must_use]
    pub const fn base(&self) -> &RequestConfig {
        &self.base
    }

    /// Watch for triggers until the stream closes
    ///
    /// Dispatches `NotAsked` first. Then, for every action `take` maps to
    /// overrides, runs [`request_flow`](Self::request_flow) to completion
    /// before looking at the next trigger. Triggers that arrive meanwhile
    /// stay queued in the watcher.
    ///
    /// Returns when the watcher closes or the store stops accepting actions.
    pub async fn run<A, T, D>(&self, mut watcher: Watcher<A>, mut take: T, dispatch: &D)
    where
        T: FnMut(A) -> Option<ConfigOverrides>,
        D: Dispatch<ServiceAction> + ?Sized,
    {
        tracing::info!(namespace = self.namespace, "Request orchestrator started");

        if let Err(error) = dispatch.dispatch(ServiceAction::NotAsked).await {
            tracing::warn!(namespace = self.namespace, %error, "Could not reset lifecycle, stopping");
            return;
        }

        while let Some(overrides) = watcher.take(&mut take).await {
            let config = self.base.merge(&overrides);
            if let Err(error) = self.request_flow(config, dispatch).await {
                tracing::warn!(namespace = self.namespace, %error, "Dispatch failed, stopping");
                return;
            }
        }

        tracing::info!(namespace = self.namespace, "Action stream closed, orchestrator stopped");
    }

    /// Perform one request and report it through lifecycle actions
    ///
    /// Dispatches `Loading`, awaits the call, then dispatches `Success` or
    /// `Failure`. Call errors are recorded in the store and never returned.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of a dispatch the store rejected.
    #[tracing::instrument(
        skip(self, config, dispatch),
        name = "request_flow",
        fields(namespace = self.namespace, method = %config.method, url = %config.url)
    )]
    pub async fn request_flow<D>(&self, config: RequestConfig, dispatch: &D) -> Result<(), StoreError>
    where
        D: Dispatch<ServiceAction> + ?Sized,
    {
        dispatch.dispatch(ServiceAction::Loading).await?;

        let start = Instant::now();
        let result = self.client.call(config.clone()).await;
        metrics::histogram!("service.request.duration_seconds", "namespace" => self.namespace)
            .record(start.elapsed().as_secs_f64());

        let action = match result {
            Ok(response_data) => {
                tracing::debug!("Request succeeded");
                metrics::counter!(
                    "service.requests.total",
                    "namespace" => self.namespace,
                    "outcome" => "success"
                )
                .increment(1);
                ServiceAction::Success { response_data }
            },
            Err(error) => {
                tracing::warn!(%error, "Request failed");
                metrics::counter!(
                    "service.requests.total",
                    "namespace" => self.namespace,
                    "outcome" => "failure"
                )
                .increment(1);
                ServiceAction::Failure {
                    error: ErrorRecord::from_call_error(&error, &config),
                }
            },
        };

        dispatch.dispatch(action).await
    }
}
