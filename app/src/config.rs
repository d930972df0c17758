//! Application configuration from environment variables.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `GIPHY_API_KEY` | public beta key | sent as `api_key` |
//! | `GIPHY_TAG` | `cat` | sent as `tag` |
//! | `GIPHY_ENDPOINT` | random GIF endpoint | |
//! | `GIPHY_TIMEOUT_SECS` | `10` | must be > 0 |
//! | `SHUTDOWN_TIMEOUT_SECS` | `5` | |
//! | `METRICS_ADDR` | unset | Prometheus exporter address |
//!
//! Log filtering is read separately from `RUST_LOG`.
//!
//! # Example
//!
//! ```
//! use remote_data_app::config::AppConfig;
//!
//! let config = AppConfig::from_lookup(|key| match key {
//!     "GIPHY_TAG" => Some("kitten".to_string()),
//!     _ => None,
//! })?;
//! assert_eq!(config.giphy.tag, "kitten");
//! # Ok::<(), remote_data_app::config::ConfigError>(())
//! ```

use giphy_cats::GiphyConfig;
use remote_data_runtime::StoreConfig;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Everything the application needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GetGiphyCats request settings
    pub giphy: GiphyConfig,
    /// Store settings
    pub store: StoreConfig,
    /// Prometheus exporter address, if metrics are exported
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            giphy: GiphyConfig::default(),
            store: StoreConfig::new(Duration::from_secs(5)),
            metrics_addr: None,
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is malformed or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is malformed or out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("GIPHY_API_KEY") {
            config.giphy.api_key = key;
        }
        if let Some(tag) = lookup("GIPHY_TAG") {
            config.giphy.tag = tag;
        }
        if let Some(endpoint) = lookup("GIPHY_ENDPOINT") {
            config.giphy.endpoint = endpoint;
        }
        if let Some(secs) = parse::<u64, _>(&lookup, "GIPHY_TIMEOUT_SECS")? {
            config.giphy.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse::<u64, _>(&lookup, "SHUTDOWN_TIMEOUT_SECS")? {
            config.store.default_shutdown_timeout = Duration::from_secs(secs);
        }
        config.metrics_addr = parse(&lookup, "METRICS_ADDR")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.giphy.api_key.is_empty() {
            return Err(ConfigError::Validation("GIPHY_API_KEY cannot be empty".to_string()));
        }
        if self.giphy.endpoint.is_empty() {
            return Err(ConfigError::Validation("GIPHY_ENDPOINT cannot be empty".to_string()));
        }
        if self.giphy.timeout.is_zero() {
            return Err(ConfigError::Validation("GIPHY_TIMEOUT_SECS must be > 0".to_string()));
        }
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
