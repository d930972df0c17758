//! Request configuration and per-trigger overrides.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base configuration of a service's request.
///
/// `params` are sent as query parameters. `timeout` is enforced by the
/// [`HttpCall`](crate::HttpCall) implementation.
///
/// # Example
///
/// ```
/// use remote_data_service::{HttpMethod, RequestConfig};
///
/// let config = RequestConfig::get("https://api.example.com/things")
///     .with_param("limit", 10)
///     .with_header("accept", "application/json");
///
/// assert_eq!(config.method, HttpMethod::Get);
/// assert_eq!(config.params["limit"], 10);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Absolute request URL
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Query parameters
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Time allowed for the whole call
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// A `GET` request to `url`
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the method
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Shallow merge: every field present in `overrides` replaces the
    /// base field wholesale, absent fields keep the base value.
    ///
    /// `params` and `headers` are replaced, not merged key by key.
    ///
    /// ```
    /// use remote_data_service::{ConfigOverrides, RequestConfig};
    /// use serde_json::json;
    /// use std::collections::BTreeMap;
    ///
    /// let base = RequestConfig::get("https://example.com").with_param("tag", "cat");
    /// let overrides = ConfigOverrides {
    ///     params: Some(BTreeMap::from([("foo".to_string(), json!("bar"))])),
    ///     ..ConfigOverrides::default()
    /// };
    ///
    /// let merged = base.merge(&overrides);
    /// assert_eq!(merged.url, "https://example.com");
    /// assert_eq!(merged.params, BTreeMap::from([("foo".to_string(), json!("bar"))]));
    /// ```
    #[must_use]
    pub fn merge(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            url: overrides.url.clone().unwrap_or_else(|| self.url.clone()),
            method: overrides.method.unwrap_or(self.method),
            params: overrides
                .params
                .clone()
                .unwrap_or_else(|| self.params.clone()),
            headers: overrides
                .headers
                .clone()
                .unwrap_or_else(|| self.headers.clone()),
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}

/// Per-trigger overrides carried by `MakeRequest`.
///
/// Every field is optional; see [`RequestConfig::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    /// Replacement URL
    pub url: Option<String>,
    /// Replacement method
    pub method: Option<HttpMethod>,
    /// Replacement query parameters
    pub params: Option<BTreeMap<String, Value>>,
    /// Replacement headers
    pub headers: Option<BTreeMap<String, String>>,
    /// Replacement timeout
    pub timeout: Option<Duration>,
}

impl ConfigOverrides {
    /// Overrides that replace only the query parameters
    #[must_use]
    pub fn params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            params: Some(
                params
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Whether no field is overridden
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.method.is_none()
            && self.params.is_none()
            && self.headers.is_none()
            && self.timeout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn base() -> RequestConfig {
        RequestConfig::get("https://api.example.com/random")
            .with_param("api_key", "key")
            .with_param("tag", "cat")
            .with_header("accept", "application/json")
            .with_timeout(Duration::from_secs(10))
    }

    #[test]
    fn test_empty_overrides_keep_base() {
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(base().merge(&overrides), base());
    }

    #[test]
    fn test_params_are_replaced_wholesale() {
        let merged = base().merge(&ConfigOverrides::params([("foo", "bar")]));

        assert_eq!(merged.params, BTreeMap::from([("foo".to_string(), json!("bar"))]));
        assert_eq!(merged.url, base().url);
        assert_eq!(merged.headers, base().headers);
    }

    #[test]
    fn test_scalar_overrides() {
        let overrides = ConfigOverrides {
            url: Some("https://other.example.com".to_string()),
            method: Some(HttpMethod::Post),
            timeout: Some(Duration::from_millis(250)),
            ..ConfigOverrides::default()
        };

        let merged = base().merge(&overrides);
        assert_eq!(merged.url, "https://other.example.com");
        assert_eq!(merged.method, HttpMethod::Post);
        assert_eq!(merged.timeout, Some(Duration::from_millis(250)));
        assert_eq!(merged.params, base().params);
    }

    #[test]
    fn test_merge_leaves_base_untouched() {
        let base = base();
        let _ = base.merge(&ConfigOverrides::params([("foo", "bar")]));
        assert_eq!(base.params["tag"], json!("cat"));
    }

    #[test]
    fn test_overrides_deserialize_from_partial_json() {
        let overrides: ConfigOverrides =
            serde_json::from_value(json!({ "params": { "tag": "dog" } })).unwrap_or_default();

        assert_eq!(overrides, ConfigOverrides::params([("tag", "dog")]));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(
            serde_json::to_value(HttpMethod::Patch).ok(),
            Some(json!("PATCH"))
        );
    }

    proptest! {
        #[test]
        fn prop_present_params_win(key in "[a-z]{1,8}", value in "[a-z0-9]{0,8}") {
            let merged = base().merge(&ConfigOverrides::params([(key.clone(), value.clone())]));
            prop_assert_eq!(merged.params.len(), 1);
            prop_assert_eq!(&merged.params[&key], &json!(value));
        }
    }
}
