//! Decoding of Twitter API v2 collection responses.
//!
//! A collection response looks like:
//!
//! ```json
//! {
//!   "data": [{"id": "1", "text": "hi", "author_id": "12"}],
//!   "includes": {"users": [{"id": "12", "username": "jack"}]},
//!   "meta": {"result_count": 1, "next_token": "abc"}
//! }
//! ```
//!
//! Every top-level key is optional. This module turns such a body into:
//!
//! - [`Tweets`]: the ordered posts plus a cursor over adjacent pages
//! - [`ResourceSet`] / [`ResourceIndex`]: the `includes`, indexed by identifier
//! - [`PageMeta`]: the pagination tokens and counts from `meta`
//! - [`Entity`]: one post, user or media record
//!
//! Errors are reported through [`ResponseError`].

mod entity;
mod errors;
mod meta;
mod resources;
mod tweets;

pub use entity::{canonical_identifier, Entity, Identifier};
pub use errors::ResponseError;
pub use meta::PageMeta;
pub use resources::{ResourceCategory, ResourceIndex, ResourceSet};
pub use tweets::{RequestContext, Tweets, NEXT_TOKEN_PARAM, PREVIOUS_TOKEN_PARAM};
