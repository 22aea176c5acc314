//! HTTP client types for Twitter API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async client, authenticated with a bearer token
//! - [`HttpRequest`]: a `GET` request to be sent to the API
//! - [`HttpResponse`]: status, headers and raw body of a response
//! - [`RateLimit`]: the `x-rate-limit-*` header values
//! - [`Transport`]: the trait [`Tweets`](crate::response::Tweets) pages through
//!
//! # Retry Behavior
//!
//! - **429 (Too Many Requests)**: waits until the rate limit window resets,
//!   capped at [`MAX_RATE_LIMIT_WAIT`] seconds
//! - **503 (Service Unavailable)**: retries with a fixed 1-second delay
//! - **Other errors**: returned immediately
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`HttpRequestBuilder::tries`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, MAX_RATE_LIMIT_WAIT, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit};
pub use transport::Transport;
