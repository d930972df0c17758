//! # Giphy Cats
//!
//! The `services/GetGiphyCats` request service: fetches a random GIF for a
//! tag from the Giphy API.
//!
//! The lifecycle, reducer and orchestrator are the generic ones from
//! `remote-data-service`; this crate contributes the namespace, the base
//! request and selectors that know the shape of a Giphy response
//! (`{ "data": { "image_url": ... }, "meta": ... }`).
//!
//! ## Example
//!
//! ```
//! use giphy_cats::{GiphyConfig, NAMESPACE};
//!
//! let config = GiphyConfig::default().with_tag("kitten");
//! let request = config.request_config();
//!
//! assert_eq!(NAMESPACE, "services/GetGiphyCats");
//! assert_eq!(request.params["tag"], "kitten");
//! ```

use remote_data_service::{HttpCall, RequestConfig, RequestOrchestrator};
use std::time::Duration;

/// Namespace of every action type of this service
pub const NAMESPACE: &str = "services/GetGiphyCats";

/// Random GIF endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/random";

/// Giphy's public beta key
pub const DEFAULT_API_KEY: &str = "dc6zaTOxFJmzC";

/// Tag searched when none is configured
pub const DEFAULT_TAG: &str = "cat";

/// Settings for the Giphy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiphyConfig {
    /// API key sent as the `api_key` parameter
    pub api_key: String,
    /// Tag sent as the `tag` parameter
    pub tag: String,
    /// Endpoint URL
    pub endpoint: String,
    /// Call timeout
    pub timeout: Duration,
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            tag: DEFAULT_TAG.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl GiphyConfig {
    /// Set the tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The base request every trigger is merged onto
    #[must_use]
    pub fn request_config(&self) -> RequestConfig {
        RequestConfig::get(self.endpoint.clone())
            .with_param("api_key", self.api_key.clone())
            .with_param("tag", self.tag.clone())
            .with_timeout(self.timeout)
    }

    /// Overrides requesting a different tag with the same key
    ///
    /// Overridden params replace the base params wholesale, so the key is
    /// carried along.
    #[must_use]
    pub fn tag_overrides(&self, tag: &str) -> remote_data_service::ConfigOverrides {
        remote_data_service::ConfigOverrides::params([
            ("api_key", self.api_key.as_str()),
            ("tag", tag),
        ])
    }
}

/// The orchestrator of this service
#[must_use]
pub fn orchestrator<C: HttpCall>(config: &GiphyConfig, client: C) -> RequestOrchestrator<C> {
    RequestOrchestrator::new(NAMESPACE, config.request_config(), client)
}

/// Selectors for the Giphy response
pub mod selectors {
    use remote_data_service::{Lifecycle, selectors::response_data};
    use serde_json::Value;

    /// The `data` object of the response
    #[must_use]
    pub fn data(state: &Lifecycle) -> Option<Value> {
        match response_data(state) {
            Value::Object(mut body) => body.remove("data"),
            _ => None,
        }
    }

    /// URL of the GIF
    #[must_use]
    pub fn image_url(state: &Lifecycle) -> Option<String> {
        data(state)?
            .get("image_url")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
