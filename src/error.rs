//! Error types for client configuration.
//!
//! Configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use tweetkit::{BearerToken, ConfigError};
//!
//! let result = BearerToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBearerToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`TweetkitConfig`](crate::TweetkitConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Bearer token cannot be empty.
    #[error("Bearer token cannot be empty. Please provide a valid Twitter API bearer token.")]
    EmptyBearerToken,

    /// API host URL is invalid.
    #[error("Invalid API host '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.twitter.com').")]
    InvalidApiHost {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version path segment is invalid.
    #[error("Invalid API version '{version}'. Expected a non-empty path segment such as '2'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
