//! HTTP client for Twitter API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::TweetkitConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Upper bound on how long a rate-limited retry will sleep, in seconds.
pub const MAX_RATE_LIMIT_WAIT: u64 = 60;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Twitter API.
///
/// The client handles:
/// - URL construction from the configured host and API version
/// - Default headers including User-Agent and the bearer token
/// - Default query parameters from the configuration
/// - Automatic retry logic for 429 and 503 responses
///
/// `HttpClient` is `Send + Sync`; share it across cursors with an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use tweetkit::{BearerToken, TweetkitConfig};
/// use tweetkit::clients::{HttpClient, HttpRequest};
///
/// let config = TweetkitConfig::builder()
///     .bearer_token(BearerToken::new("token").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder("tweets/search/recent")
///     .query_param("query", "rustlang")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URL including the version segment (e.g., `https://api.twitter.com/2`).
    base_url: String,
    default_headers: HashMap<String, String>,
    default_query: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &TweetkitConfig) -> Result<Self, HttpError> {
        let base_url = format!("{}/{}", config.api_host().as_ref(), config.api_version());

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}tweetkit v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.bearer_token().as_ref()),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url,
            default_headers,
            default_query: config.default_query().clone(),
        })
    }

    /// Returns the base URL, including the API version segment.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the query parameters added to every request.
    #[must_use]
    pub const fn default_query(&self) -> &HashMap<String, String> {
        &self.default_query
    }

    /// Resolves a request's path against the base URL.
    ///
    /// Absolute URLs (see [`HttpRequest::is_absolute`]) are returned unchanged.
    #[must_use]
    pub fn resolve_url(&self, request: &HttpRequest) -> String {
        if request.is_absolute() {
            request.path.clone()
        } else {
            format!("{}/{}", self.base_url, request.path.trim_start_matches('/'))
        }
    }

    /// Sends a `GET` request to the API.
    ///
    /// Request-level query parameters override the client defaults with the
    /// same key.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request);

        let mut headers = self.default_headers.clone();
        headers.extend(request.extra_headers.clone());

        let mut query = self.default_query.clone();
        query.extend(request.query.clone());

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self.client.get(&url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if !query.is_empty() {
                req_builder = req_builder.query(&query);
            }

            tracing::debug!(url = %url, attempt = tries, "Sending GET request");
            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body = res.text().await?;

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                if let Some(limit) = response.rate_limit.filter(|l| l.is_exhausted()) {
                    tracing::warn!(
                        "Rate limit exhausted for {}, window resets at {}",
                        request.path,
                        limit.reset_at
                    );
                }
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let transaction_id = response.transaction_id().map(String::from);

            let should_retry = code == 429 || code == 503;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    transaction_id,
                }));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        transaction_id,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    transaction_id,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                "Request to {} failed with {}, retrying in {:?} (attempt {} of {})",
                request.path,
                code,
                delay,
                tries,
                request.tries
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    ///
    /// A 429 waits until the rate limit window resets, capped at
    /// [`MAX_RATE_LIMIT_WAIT`]; everything else waits [`RETRY_WAIT_TIME`].
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(limit) = response.rate_limit {
                let wait = (limit.reset_at - Utc::now()).num_seconds();
                if let Ok(wait) = u64::try_from(wait) {
                    return Duration::from_secs(wait.clamp(RETRY_WAIT_TIME, MAX_RATE_LIMIT_WAIT));
                }
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes the API's problem response into a compact JSON message.
    fn serialize_error(response: &HttpResponse) -> String {
        let Ok(body) = serde_json::from_str::<serde_json::Value>(response.body()) else {
            return serde_json::json!({ "raw_body": response.body() }).to_string();
        };

        let mut error_body = serde_json::Map::new();
        for key in ["title", "detail", "type", "errors"] {
            if let Some(value) = body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if let Some(transaction_id) = response.transaction_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {transaction_id}."
                )),
            );
        }

        serde_json::Value::Object(error_body).to_string()
    }
}

impl Transport for HttpClient {
    async fn get(
        &self,
        url: &str,
        query: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(url).query(query.clone()).build()?;
        self.request(request).await
    }
}
