//! # Remote Data App
//!
//! Mounts the Counter and GetGiphyCats features on one store.
//!
//! [`AppState`] holds one slice per feature and [`AppAction`] wraps each
//! feature's actions. [`app_reducer`] scopes every feature reducer to its
//! slice, so an action of one feature is the identity on the other's state.
//! [`App::start`] spawns the request orchestrator that drives GetGiphyCats;
//! the counter's total-clicks tally runs as an effect of its own reducer.
//!
//! ## Example
//!
//! ```no_run
//! use remote_data_app::{App, AppAction, config::AppConfig};
//! use remote_data_service::ReqwestCall;
//!
//! # async fn example() -> Result<(), remote_data_app::AppError> {
//! let app = App::start(&AppConfig::default(), ReqwestCall::new());
//!
//! app.dispatch_str("containers/Counter/INCREMENT").await?;
//! app.fetch_cat(Some("kitten")).await?;
//!
//! let state = app.snapshot().await;
//! println!("{}", remote_data_app::view::render(&state));
//! app.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod view;

use counter::{CounterAction, CounterReducer, CounterState};
use giphy_cats::GiphyConfig;
use remote_data_core::{
    action::{ActionName, Namespaced, split_action_type},
    composition::{CombinedReducer, combine_reducers, scope_reducer},
    reducer::Reducer,
};
use remote_data_runtime::{Store, StoreError};
use remote_data_service::{ConfigOverrides, HttpCall, Lifecycle, LifecycleReducer, ServiceAction};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

pub use command::Command;

/// Application error
#[derive(Error, Debug)]
pub enum AppError {
    /// The action type does not name a known namespace and action
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    /// The action exists but only the application may dispatch it
    #[error("{0} cannot be dispatched directly")]
    NotATrigger(String),

    /// The input is not a command
    #[error("Unknown command: {0} (type `help` for a list)")]
    UnknownCommand(String),

    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// State of the whole application, one slice per feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// `containers/Counter`
    pub counter: CounterState,
    /// `services/GetGiphyCats`
    pub giphy_cats: Lifecycle,
}

/// Every action the application store reduces
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// A `containers/Counter` action
    Counter(CounterAction),
    /// A `services/GetGiphyCats` action
    GiphyCats(ServiceAction),
}

impl AppAction {
    /// The counter action, if this is one
    #[must_use]
    pub fn counter(self) -> Option<CounterAction> {
        match self {
            Self::Counter(action) => Some(action),
            Self::GiphyCats(_) => None,
        }
    }

    /// The GetGiphyCats action, if this is one
    #[must_use]
    pub fn giphy_cats(self) -> Option<ServiceAction> {
        match self {
            Self::GiphyCats(action) => Some(action),
            Self::Counter(_) => None,
        }
    }

    /// The overrides of a GetGiphyCats trigger
    #[must_use]
    pub fn giphy_trigger(self) -> Option<ConfigOverrides> {
        self.giphy_cats()?.into_trigger()
    }

    /// Parse a fully qualified action type such as
    /// `containers/Counter/INCREMENT`
    ///
    /// Only triggers can be parsed; derived actions come from the
    /// orchestrator or from effects.
    ///
    /// # Errors
    ///
    /// [`AppError::UnknownAction`] for a malformed type or a foreign
    /// namespace, [`AppError::NotATrigger`] for an action that is not a
    /// trigger.
    pub fn from_action_type(action_type: &str) -> Result<Self, AppError> {
        let (namespace, name) = split_action_type(action_type)
            .ok_or_else(|| AppError::UnknownAction(action_type.to_string()))?;

        let action = match namespace {
            counter::NAMESPACE => CounterAction::trigger_from_name(name).map(Self::Counter),
            giphy_cats::NAMESPACE => ServiceAction::trigger_from_name(name).map(Self::GiphyCats),
            _ => return Err(AppError::UnknownAction(action_type.to_string())),
        };

        action.ok_or_else(|| AppError::NotATrigger(action_type.to_string()))
    }
}

impl ActionName for AppAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Counter(action) => action.name(),
            Self::GiphyCats(action) => action.name(),
        }
    }
}

impl Namespaced for AppAction {
    fn namespace(&self) -> &'static str {
        match self {
            Self::Counter(_) => counter::NAMESPACE,
            Self::GiphyCats(_) => giphy_cats::NAMESPACE,
        }
    }
}

/// Reducer of the application store
pub type AppReducer = CombinedReducer<AppState, AppAction, ()>;

/// The application store
pub type AppStore = Store<AppState, AppAction, (), AppReducer>;

type BoxedReducer = Box<dyn Reducer<State = AppState, Action = AppAction, Environment = ()> + Send + Sync>;

fn counter_slice(state: &mut AppState) -> &mut CounterState {
    &mut state.counter
}

fn giphy_cats_slice(state: &mut AppState) -> &mut Lifecycle {
    &mut state.giphy_cats
}

/// Every feature reducer scoped to its slice
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            CounterReducer,
            counter_slice,
            AppAction::counter,
            AppAction::Counter,
        )) as BoxedReducer,
        Box::new(scope_reducer(
            LifecycleReducer,
            giphy_cats_slice,
            AppAction::giphy_cats,
            AppAction::GiphyCats,
        )) as BoxedReducer,
    ])
}

/// A running application: the store and the GetGiphyCats orchestrator
pub struct App {
    store: AppStore,
    giphy: GiphyConfig,
    orchestrator: JoinHandle<()>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("giphy", &self.giphy)
            .field("orchestrator_finished", &self.orchestrator.is_finished())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the store and spawn the GetGiphyCats orchestrator
    ///
    /// Must be called from within a Tokio runtime. The orchestrator's watcher
    /// is registered before this returns, so no trigger dispatched afterwards
    /// is missed.
    #[must_use]
    pub fn start<C>(config: &config::AppConfig, client: C) -> Self
    where
        C: HttpCall + 'static,
    {
        let store = Store::with_config(AppState::default(), app_reducer(), (), config.store.clone());

        let service = giphy_cats::orchestrator(&config.giphy, client);
        let watcher = store.watch();
        let dispatcher = store.scope(AppAction::GiphyCats);
        let orchestrator = tokio::spawn(async move {
            service.run(watcher, AppAction::giphy_trigger, &dispatcher).await;
        });

        tracing::info!(
            counter = counter::NAMESPACE,
            giphy_cats = giphy_cats::NAMESPACE,
            "Application started"
        );

        Self {
            store,
            giphy: config.giphy.clone(),
            orchestrator,
        }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &AppStore {
        &self.store
    }

    /// Dispatch an action and wait for the effects it returned
    ///
    /// Actions fed back by those effects are reduced before this returns.
    /// Requests run by the orchestrator are not effects and may still be in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down.
    pub async fn dispatch(&self, action: AppAction) -> Result<(), AppError> {
        tracing::debug!(action = %action.action_type(), "Dispatching");
        self.store.send(action).await?.wait().await;
        Ok(())
    }

    /// Dispatch a trigger by its fully qualified type
    ///
    /// # Errors
    ///
    /// See [`AppAction::from_action_type`] and [`App::dispatch`].
    pub async fn dispatch_str(&self, action_type: &str) -> Result<(), AppError> {
        self.dispatch(AppAction::from_action_type(action_type)?).await
    }

    /// Ask for a random GIF, for `tag` or the configured one
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down.
    pub async fn fetch_cat(&self, tag: Option<&str>) -> Result<(), AppError> {
        let overrides = tag.map_or_else(ConfigOverrides::default, |tag| {
            self.giphy.tag_overrides(tag)
        });
        self.dispatch(AppAction::GiphyCats(ServiceAction::MakeRequest { overrides }))
            .await
    }

    /// Run a parsed command
    ///
    /// Commands that only read or leave the loop are no-ops here.
    ///
    /// # Errors
    ///
    /// See [`App::dispatch_str`].
    pub async fn execute(&self, command: &Command) -> Result<(), AppError> {
        match command {
            Command::Increment => self.dispatch(AppAction::Counter(CounterAction::Increment)).await,
            Command::Decrement => self.dispatch(AppAction::Counter(CounterAction::Decrement)).await,
            Command::FetchCat(tag) => self.fetch_cat(tag.as_deref()).await,
            Command::Dispatch(action_type) => self.dispatch_str(action_type).await,
            Command::ShowState | Command::Help | Command::Quit => Ok(()),
        }
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> AppState {
        self.store.state(AppState::clone).await
    }

    /// Reject new actions, wait for running effects, stop the orchestrator
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if effects are still running after the
    /// configured shutdown timeout.
    pub async fn shutdown(self) -> Result<(), AppError> {
        let result = self.store.shutdown_default().await;
        self.orchestrator.abort();
        tracing::info!("Application stopped");
        result.map_err(AppError::from)
    }
}
