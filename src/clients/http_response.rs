//! HTTP response types.
//!
//! [`HttpResponse`] keeps the raw body text untouched: decoding it is the
//! job of the [`response`](crate::response) layer, which needs to report
//! invalid JSON as its own error.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

/// Rate limit information parsed from the `x-rate-limit-*` headers.
///
/// # Example
///
/// ```rust
/// use tweetkit::clients::RateLimit;
///
/// let limit = RateLimit::parse("450", "449", "1700000000").unwrap();
/// assert_eq!(limit.limit, 450);
/// assert_eq!(limit.remaining, 449);
/// assert!(!limit.is_exhausted());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed in the current window (`x-rate-limit-limit`).
    pub limit: u32,
    /// Requests left in the current window (`x-rate-limit-remaining`).
    pub remaining: u32,
    /// When the window resets (`x-rate-limit-reset`, epoch seconds).
    pub reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Parses the three rate limit header values.
    ///
    /// Returns `None` if any value is not a valid number.
    #[must_use]
    pub fn parse(limit: &str, remaining: &str, reset: &str) -> Option<Self> {
        let limit = limit.trim().parse().ok()?;
        let remaining = remaining.trim().parse().ok()?;
        let reset: i64 = reset.trim().parse().ok()?;
        let reset_at = Utc.timestamp_opt(reset, 0).single()?;

        Some(Self {
            limit,
            remaining,
            reset_at,
        })
    }

    /// Returns `true` if no requests are left in the current window.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// An HTTP response from the API.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw body text.
    body: String,
    /// Rate limit information, when all three headers are present.
    pub rate_limit: Option<RateLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        };

        let rate_limit = match (
            header("x-rate-limit-limit"),
            header("x-rate-limit-remaining"),
            header("x-rate-limit-reset"),
        ) {
            (Some(limit), Some(remaining), Some(reset)) => RateLimit::parse(limit, remaining, reset),
            _ => None,
        };

        Self {
            code,
            headers,
            body: body.into(),
            rate_limit,
        }
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the body text.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header (lower-case name).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-transaction-id` header, useful in error reports.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.header("x-transaction-id")
    }
}
