//! # tweetkit
//!
//! Response decoding and cursor pagination for the Twitter API v2.
//!
//! ## Overview
//!
//! This crate provides:
//! - Decoding of collection responses into posts, indexed `includes` and
//!   pagination metadata via [`response`]
//! - A resumable cursor ([`Tweets`]) that fetches the next or previous page
//!   with the same query
//! - An async HTTP client with bearer-token auth and retry handling via
//!   [`clients`]
//! - Validated configuration via [`TweetkitConfig`]
//!
//! ## Decoding a Response
//!
//! ```rust
//! use tweetkit::Tweets;
//!
//! let body = r#"{"data":[{"id":"1","text":"hi"}],"meta":{"next_token":"abc"}}"#;
//! let tweets = Tweets::from_body(body).unwrap();
//!
//! assert_eq!(tweets.len(), 1);
//! assert_eq!(tweets.posts()[0].identifier(), "1");
//! assert_eq!(tweets.meta().next_token(), Some("abc"));
//! assert_eq!(tweets.meta().previous_token(), None);
//! ```
//!
//! ## Paging Through Results
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use tweetkit::{BearerToken, HttpClient, Tweets, TweetkitConfig, ResponseError};
//!
//! let config = TweetkitConfig::builder()
//!     .bearer_token(BearerToken::new(std::env::var("TWITTER_BEARER_TOKEN")?)?)
//!     .default_query_param("expansions", "author_id")
//!     .build()?;
//! let client = Arc::new(HttpClient::new(&config)?);
//!
//! let mut query = HashMap::new();
//! query.insert("query".to_string(), "rustlang".to_string());
//! let mut tweets = Tweets::fetch(client, "tweets/search/recent", query).await?;
//!
//! loop {
//!     for post in &tweets {
//!         println!("{}: {:?}", post.identifier(), post.text());
//!     }
//!     match tweets.next_page().await {
//!         Ok(_) => continue,
//!         Err(ResponseError::NoNextPage) => break,
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **No shared pagination state**: tokens travel as explicit request
//!   parameters, so cursors can share one client
//! - **All-or-nothing page swaps**: a failed fetch keeps the current page

pub mod clients;
pub mod config;
pub mod error;
pub mod response;

pub use config::{ApiHost, BearerToken, TweetkitConfig, TweetkitConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, MaxHttpRetriesExceededError, RateLimit, Transport,
};

pub use response::{
    Entity, PageMeta, RequestContext, ResourceCategory, ResourceIndex, ResourceSet,
    ResponseError, Tweets,
};
