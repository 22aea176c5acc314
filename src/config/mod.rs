//! Configuration types for the Twitter API client.
//!
//! # Overview
//!
//! - [`TweetkitConfig`]: the settings used to construct an
//!   [`HttpClient`](crate::clients::HttpClient)
//! - [`TweetkitConfigBuilder`]: a builder for [`TweetkitConfig`]
//! - [`BearerToken`]: a validated bearer token with masked debug output
//! - [`ApiHost`]: a validated API host URL
//!
//! # Example
//!
//! ```rust
//! use tweetkit::{BearerToken, TweetkitConfig};
//!
//! let config = TweetkitConfig::builder()
//!     .bearer_token(BearerToken::new("my-token").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version(), "2");
//! ```

mod newtypes;

use std::collections::HashMap;

pub use newtypes::{ApiHost, BearerToken};

use crate::error::ConfigError;

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "2";

/// Configuration for the Twitter API client.
///
/// `TweetkitConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct TweetkitConfig {
    bearer_token: BearerToken,
    api_host: ApiHost,
    api_version: String,
    user_agent_prefix: Option<String>,
    default_query: HashMap<String, String>,
}

impl TweetkitConfig {
    /// Creates a new builder for constructing a `TweetkitConfig`.
    #[must_use]
    pub fn builder() -> TweetkitConfigBuilder {
        TweetkitConfigBuilder::new()
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn bearer_token(&self) -> &BearerToken {
        &self.bearer_token
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Returns the API version path segment (e.g., "2").
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the query parameters sent with every request.
    ///
    /// Typical entries are `tweet.fields` or `expansions` that a caller
    /// wants on every page.
    #[must_use]
    pub const fn default_query(&self) -> &HashMap<String, String> {
        &self.default_query
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TweetkitConfig>();
};

/// Builder for constructing [`TweetkitConfig`] instances.
///
/// Only `bearer_token` is required.
///
/// # Defaults
///
/// - `api_host`: `https://api.twitter.com`
/// - `api_version`: `"2"`
/// - `user_agent_prefix`: `None`
/// - `default_query`: empty
#[derive(Debug, Default)]
pub struct TweetkitConfigBuilder {
    bearer_token: Option<BearerToken>,
    api_host: Option<ApiHost>,
    api_version: Option<String>,
    user_agent_prefix: Option<String>,
    default_query: HashMap<String, String>,
}

impl TweetkitConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token (required).
    #[must_use]
    pub fn bearer_token(mut self, token: BearerToken) -> Self {
        self.bearer_token = Some(token);
        self
    }

    /// Sets the API host, e.g. to point at a proxy or a mock server.
    #[must_use]
    pub fn api_host(mut self, host: ApiHost) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the API version path segment.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a query parameter sent with every request.
    #[must_use]
    pub fn default_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_query.insert(key.into(), value.into());
        self
    }

    /// Builds the [`TweetkitConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `bearer_token` is not
    /// set, or [`ConfigError::InvalidApiVersion`] if the version is empty or
    /// contains a `/`.
    pub fn build(self) -> Result<TweetkitConfig, ConfigError> {
        let bearer_token = self
            .bearer_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "bearer_token",
            })?;

        let api_version = self
            .api_version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.trim().is_empty() || api_version.contains('/') {
            return Err(ConfigError::InvalidApiVersion {
                version: api_version,
            });
        }

        Ok(TweetkitConfig {
            bearer_token,
            api_host: self.api_host.unwrap_or_default(),
            api_version,
            user_agent_prefix: self.user_agent_prefix,
            default_query: self.default_query,
        })
    }
}
