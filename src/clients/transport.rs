//! The seam between the response layer and the network.

use std::collections::HashMap;
use std::future::Future;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;

/// Something that can issue a `GET` and hand back the raw response.
///
/// [`Tweets`](crate::response::Tweets) only needs this to fetch adjacent
/// pages. The query is passed explicitly on every call: a transport keeps
/// no per-pagination state, so two cursors may share one transport.
///
/// [`HttpClient`](crate::clients::HttpClient) is the production
/// implementation. Tests can supply their own.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use tweetkit::clients::{HttpError, HttpResponse, Transport};
///
/// struct Canned(&'static str);
///
/// impl Transport for Canned {
///     async fn get(
///         &self,
///         _url: &str,
///         _query: &HashMap<String, String>,
///     ) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(200, HashMap::new(), self.0))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Issues a `GET` of `url` with the given query parameters.
    ///
    /// `url` may be absolute or relative to the transport's base.
    fn get(
        &self,
        url: &str,
        query: &HashMap<String, String>,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}
