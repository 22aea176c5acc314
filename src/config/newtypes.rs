//! Validated newtype wrappers for configuration values.
//!
//! These wrap raw strings and validate them on construction, so a
//! [`TweetkitConfig`](super::TweetkitConfig) can only hold usable values.

use crate::error::ConfigError;
use std::fmt;

/// A validated Twitter API bearer token.
///
/// The token is non-empty and its value is masked in debug output so it
/// does not leak into logs.
///
/// # Example
///
/// ```rust
/// use tweetkit::BearerToken;
///
/// let token = BearerToken::new("AAAA-token").unwrap();
/// assert_eq!(token.as_ref(), "AAAA-token");
/// assert_eq!(format!("{:?}", token), "BearerToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a new validated bearer token.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBearerToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyBearerToken);
        }
        Ok(Self(token.to_string()))
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

/// A validated API host URL, such as `https://api.twitter.com`.
///
/// Any trailing slash is removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use tweetkit::ApiHost;
///
/// let host = ApiHost::new("http://localhost:8080/").unwrap();
/// assert_eq!(host.as_ref(), "http://localhost:8080");
/// assert_eq!(host.scheme(), "http");
/// assert_eq!(host.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiHost {
    /// The production Twitter API host.
    pub const DEFAULT: &'static str = "https://api.twitter.com";

    /// Creates a new validated API host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiHost`] if the URL has no scheme,
    /// an empty host, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidApiHost { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: Self::DEFAULT.len(),
        }
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_rejects_empty_string() {
        assert!(matches!(
            BearerToken::new(""),
            Err(ConfigError::EmptyBearerToken)
        ));
        assert!(matches!(
            BearerToken::new("   "),
            Err(ConfigError::EmptyBearerToken)
        ));
    }

    #[test]
    fn test_bearer_token_masks_value_in_debug() {
        let token = BearerToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "BearerToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_api_host_validates_format() {
        let host = ApiHost::new("https://api.twitter.com").unwrap();
        assert_eq!(host.scheme(), "https");
        assert_eq!(host.host_name(), "api.twitter.com");

        let host = ApiHost::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(host.scheme(), "http");
        assert_eq!(host.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_api_host_strips_trailing_slash() {
        let host = ApiHost::new("https://api.twitter.com/").unwrap();
        assert_eq!(host.as_ref(), "https://api.twitter.com");
    }

    #[test]
    fn test_api_host_rejects_invalid() {
        assert!(ApiHost::new("api.twitter.com").is_err());
        assert!(ApiHost::new("https://").is_err());
        assert!(ApiHost::new("://api.twitter.com").is_err());
        assert!(ApiHost::new("https://api.twitter.com?x=1").is_err());
    }

    #[test]
    fn test_api_host_default_matches_parsed_default() {
        let parsed = ApiHost::new(ApiHost::DEFAULT).unwrap();
        assert_eq!(ApiHost::default(), parsed);
        assert_eq!(ApiHost::default().host_name(), "api.twitter.com");
    }
}
