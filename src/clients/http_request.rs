//! HTTP request type and builder.
//!
//! The Twitter v2 read endpoints this crate pages through are all `GET`, so
//! an [`HttpRequest`] is always a `GET` of a path or absolute URL.

use std::collections::HashMap;

use crate::clients::errors::InvalidHttpRequestError;

/// A `GET` request to be sent to the API.
///
/// `path` is either relative to the configured host and version (e.g.
/// `"tweets/search/recent"`) or an absolute `http(s)://` URL.
///
/// # Example
///
/// ```rust
/// use tweetkit::clients::HttpRequest;
///
/// let request = HttpRequest::builder("tweets/search/recent")
///     .query_param("query", "rustlang")
///     .query_param("max_results", "10")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path or absolute URL for this request.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: HashMap<String, String>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a new builder for the given path.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Returns `true` if `path` is an absolute URL rather than an API path.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is empty or `tries`
    /// is zero.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim().trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        if self.tries == 0 {
            return Err(InvalidHttpRequestError::InvalidTries { tries: self.tries });
        }
        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: HashMap<String, String>,
    extra_headers: HashMap<String, String>,
    tries: u32,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: HashMap::new(),
            extra_headers: HashMap::new(),
            tries: 1,
        }
    }

    /// Merges a set of query parameters into the request.
    ///
    /// Existing keys are overwritten.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries). Higher values enable retries for 429 and
    /// 503 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            query: self.query,
            extra_headers: self.extra_headers,
            tries: self.tries,
        };
        request.verify()?;
        Ok(request)
    }
}
