//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: non-2xx responses from the API
//! - [`MaxHttpRetriesExceededError`]: retry attempts exhausted
//! - [`InvalidHttpRequestError`]: a request rejected before sending
//! - [`HttpError`]: unified error type over all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use tweetkit::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body()),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` holds a JSON object built from the `title`, `detail`, `type`
/// and `errors` fields of the API's problem response.
///
/// # Example
///
/// ```rust
/// use tweetkit::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"title":"Unauthorized"}"#.to_string(),
///     transaction_id: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"title":"Unauthorized"}"#);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Transaction ID for error reporting (from `x-transaction-id`).
    pub transaction_id: Option<String>,
}

/// Error returned when the maximum number of attempts has been used up.
///
/// Raised when a request keeps failing with 429 or 503 after all configured
/// tries.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Transaction ID for error reporting (from `x-transaction-id`).
    pub transaction_id: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path was empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// `tries` was set to zero.
    #[error("Request tries must be at least 1, got {tries}.")]
    InvalidTries {
        /// The configured number of tries.
        tries: u32,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"title":"Not Found Error"}"#.to_string(),
            transaction_id: None,
        };
        assert_eq!(error.to_string(), r#"{"title":"Not Found Error"}"#);
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"title":"Too Many Requests"}"#.to_string(),
            transaction_id: None,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_invalid_request_error_messages() {
        assert_eq!(
            InvalidHttpRequestError::EmptyPath.to_string(),
            "Cannot send a request without a path."
        );
        assert_eq!(
            InvalidHttpRequestError::InvalidTries { tries: 0 }.to_string(),
            "Request tries must be at least 1, got 0."
        );
    }

    #[test]
    fn test_http_error_status() {
        let error = HttpError::Response(HttpResponseError {
            code: 401,
            message: String::new(),
            transaction_id: None,
        });
        assert_eq!(error.status(), Some(401));

        let error = HttpError::InvalidRequest(InvalidHttpRequestError::EmptyPath);
        assert_eq!(error.status(), None);
    }
}
