//! Error types for response decoding and page traversal.
//!
//! - **Decoding**: [`ResponseError::Decode`], [`ResponseError::MalformedEntity`]
//!   and [`ResponseError::UnexpectedShape`] are fatal for the parse that
//!   raised them; no partial collection is produced.
//! - **Traversal**: [`ResponseError::NoNextPage`], [`ResponseError::NoPreviousPage`]
//!   and [`ResponseError::MissingRequestContext`] are raised before any
//!   request is made and leave the collection untouched.
//! - **Transport**: [`ResponseError::Http`] wraps the transport's error
//!   unmodified.
//!
//! Absent `data`, `meta` or `includes` sections are never errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use tweetkit::response::ResponseError;
//!
//! match tweets.next_page().await {
//!     Ok(page) => println!("{} more posts", page.len()),
//!     Err(ResponseError::NoNextPage) => println!("Reached the last page"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for decoding responses and fetching adjacent pages.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The response body is not valid JSON.
    #[error("Failed to decode response body as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A post or included entity has no usable identifier.
    #[error("Malformed entity at {section}[{index}]: {reason}")]
    MalformedEntity {
        /// Where the entity was found (e.g., "data" or "includes.users").
        section: String,
        /// Position of the entity within its section.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A section of the response has the wrong JSON type.
    #[error("Unexpected shape for '{section}': expected {expected}")]
    UnexpectedShape {
        /// The offending section (e.g., "meta" or "includes.users").
        section: String,
        /// The JSON type that was expected.
        expected: &'static str,
    },

    /// `next_page` was called but the current page has no `next_token`.
    #[error("No next page: the current page has no next_token")]
    NoNextPage,

    /// `previous_page` was called but the current page has no `previous_token`.
    #[error("No previous page: the current page has no previous_token")]
    NoPreviousPage,

    /// The collection was built without a request context to page with.
    #[error("Cannot fetch another page: no request context was stored with this collection")]
    MissingRequestContext,

    /// The transport failed to fetch the page.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResponseError {
    /// Returns `true` for the errors raised when a traversal has nowhere to go.
    ///
    /// These are raised before any request is sent, so the collection still
    /// holds the current page.
    #[must_use]
    pub const fn is_end_of_pages(&self) -> bool {
        matches!(self, Self::NoNextPage | Self::NoPreviousPage)
    }
}
