//! The page-of-posts collection and its cursor.
//!
//! [`Tweets`] owns one decoded page: the posts, the indexed `includes`, and
//! the `meta` tokens. With a [`RequestContext`] attached it can replace its
//! contents with the next or previous page.
//!
//! # Traversal
//!
//! Both directions re-request the URL of the original request with the
//! original query plus one token parameter:
//!
//! | Direction | Token source | Parameter sent |
//! |-----------|--------------|----------------|
//! | next      | `meta.next_token` | [`NEXT_TOKEN_PARAM`] |
//! | previous  | `meta.previous_token` | [`PREVIOUS_TOKEN_PARAM`] |
//!
//! The new page is fully decoded before it replaces the current one. A
//! failed request or an undecodable body leaves the collection as it was.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{HttpClient, HttpResponse, Transport};
use crate::response::{Entity, PageMeta, ResourceSet, ResponseError};

/// Query parameter carrying the token when fetching the next page.
pub const NEXT_TOKEN_PARAM: &str = "next_token";

/// Query parameter carrying the token when fetching the previous page.
pub const PREVIOUS_TOKEN_PARAM: &str = "previous";

/// What is needed to ask the same question again for an adjacent page.
pub struct RequestContext<T> {
    transport: Arc<T>,
    previous_url: String,
    previous_query: HashMap<String, String>,
}

impl<T> RequestContext<T> {
    /// Creates a context from the transport and the request that produced
    /// the current page.
    #[must_use]
    pub fn new(
        transport: Arc<T>,
        previous_url: impl Into<String>,
        previous_query: HashMap<String, String>,
    ) -> Self {
        Self {
            transport,
            previous_url: previous_url.into(),
            previous_query,
        }
    }

    /// Returns the transport pages are fetched with.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Returns the URL of the original request.
    #[must_use]
    pub fn previous_url(&self) -> &str {
        &self.previous_url
    }

    /// Returns the query of the original request, without page tokens.
    #[must_use]
    pub const fn previous_query(&self) -> &HashMap<String, String> {
        &self.previous_query
    }
}

impl<T> Clone for RequestContext<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            previous_url: self.previous_url.clone(),
            previous_query: self.previous_query.clone(),
        }
    }
}

impl<T> fmt::Debug for RequestContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("previous_url", &self.previous_url)
            .field("previous_query", &self.previous_query)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl Direction {
    const fn param(self) -> &'static str {
        match self {
            Self::Next => NEXT_TOKEN_PARAM,
            Self::Previous => PREVIOUS_TOKEN_PARAM,
        }
    }

    const fn opposite(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }

    const fn exhausted(self) -> ResponseError {
        match self {
            Self::Next => ResponseError::NoNextPage,
            Self::Previous => ResponseError::NoPreviousPage,
        }
    }

    fn token(self, meta: &PageMeta) -> Option<&str> {
        match self {
            Self::Next => meta.next_token(),
            Self::Previous => meta.previous_token(),
        }
    }
}

/// One decoded page.
#[derive(Debug, Clone)]
struct Page {
    posts: Vec<Entity>,
    resources: ResourceSet,
    meta: PageMeta,
    original_body: String,
}

impl Page {
    fn parse(body: &str) -> Result<Self, ResponseError> {
        let mut root: Value = serde_json::from_str(body)?;
        let Some(root_map) = root.as_object_mut() else {
            return Err(ResponseError::UnexpectedShape {
                section: "response".to_string(),
                expected: "an object",
            });
        };

        let posts = match root_map.remove("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Entity::from_value(item, "data", index))
                .collect::<Result<Vec<_>, _>>()?,
            Some(single @ Value::Object(_)) => vec![Entity::from_value(single, "data", 0)?],
            Some(_) => {
                return Err(ResponseError::UnexpectedShape {
                    section: "data".to_string(),
                    expected: "an array or an object",
                })
            }
        };

        let meta = PageMeta::from_meta(root_map.get("meta"))?;
        let resources = ResourceSet::from_includes(root_map.get("includes"))?;

        tracing::debug!(
            posts = posts.len(),
            next_token = meta.next_token(),
            previous_token = meta.previous_token(),
            "Parsed tweets page"
        );

        Ok(Self {
            posts,
            resources,
            meta,
            original_body: body.to_string(),
        })
    }
}

/// A page of posts with its included entities and pagination cursor.
///
/// `T` is the [`Transport`] used to fetch adjacent pages; it defaults to
/// [`HttpClient`].
///
/// # Example
///
/// ```rust
/// use tweetkit::response::Tweets;
///
/// let body = r#"{
///     "data": [{"id": "1", "text": "hi", "author_id": "12"}],
///     "includes": {"users": [{"id": "12", "username": "jack"}]},
///     "meta": {"next_token": "abc"}
/// }"#;
/// let tweets = Tweets::from_body(body).unwrap();
///
/// for post in &tweets {
///     let author_id = post.attribute("author_id").and_then(|v| v.as_str()).unwrap();
///     let author = tweets.resources().users().lookup(author_id).unwrap();
///     println!("@{}: {}", author.attribute("username").unwrap(), post.text().unwrap());
/// }
///
/// assert_eq!(tweets.len(), 1);
/// assert_eq!(tweets.meta().next_token(), Some("abc"));
/// ```
pub struct Tweets<T = HttpClient> {
    page: Page,
    context: Option<RequestContext<T>>,
}

impl Tweets<HttpClient> {
    /// Decodes a response body that has no request context attached.
    ///
    /// The result can be read but not paged; traversal returns
    /// [`ResponseError::MissingRequestContext`].
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the body is not valid JSON or holds a
    /// malformed entity.
    pub fn from_body(body: &str) -> Result<Self, ResponseError> {
        Ok(Self {
            page: Page::parse(body)?,
            context: None,
        })
    }
}

impl<T: Transport> Tweets<T> {
    /// Decodes a response and keeps `context` for fetching adjacent pages.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Decode`] if the body is not valid JSON,
    /// [`ResponseError::MalformedEntity`] if a post or included entity has
    /// no identifier, or [`ResponseError::UnexpectedShape`] if a section has
    /// the wrong JSON type.
    pub fn parse(response: &HttpResponse, context: RequestContext<T>) -> Result<Self, ResponseError> {
        Ok(Self {
            page: Page::parse(response.body())?,
            context: Some(context),
        })
    }

    /// Fetches the first page of `url` and decodes it.
    ///
    /// `url` and `query` become the request context used by
    /// [`next_page`](Self::next_page) and [`previous_page`](Self::previous_page).
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Http`] if the transport fails, or a decoding
    /// error as for [`parse`](Self::parse).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    /// use tweetkit::response::Tweets;
    ///
    /// let client = Arc::new(HttpClient::new(&config)?);
    /// let mut query = HashMap::new();
    /// query.insert("query".to_string(), "from:TwitterDev".to_string());
    ///
    /// let mut tweets = Tweets::fetch(client, "tweets/search/recent", query).await?;
    /// while tweets.has_next_page() {
    ///     tweets.next_page().await?;
    /// }
    /// ```
    pub async fn fetch(
        transport: Arc<T>,
        url: impl Into<String>,
        query: HashMap<String, String>,
    ) -> Result<Self, ResponseError> {
        let context = RequestContext::new(transport, url, query);
        let response = context
            .transport
            .get(&context.previous_url, &context.previous_query)
            .await?;
        Self::parse(&response, context)
    }

    /// Replaces this page with the next one.
    ///
    /// # Errors
    ///
    /// - [`ResponseError::NoNextPage`] if the current page has no `next_token`
    /// - [`ResponseError::MissingRequestContext`] if there is nothing to page with
    /// - [`ResponseError::Http`] or a decoding error from the new page
    ///
    /// On error the current page is kept.
    pub async fn next_page(&mut self) -> Result<&mut Self, ResponseError> {
        self.traverse(Direction::Next).await
    }

    /// Replaces this page with the previous one.
    ///
    /// Uses the same URL as [`next_page`](Self::next_page); only the token
    /// parameter differs.
    ///
    /// # Errors
    ///
    /// As for [`next_page`](Self::next_page), with
    /// [`ResponseError::NoPreviousPage`] when there is no `previous_token`.
    pub async fn previous_page(&mut self) -> Result<&mut Self, ResponseError> {
        self.traverse(Direction::Previous).await
    }

    async fn traverse(&mut self, direction: Direction) -> Result<&mut Self, ResponseError> {
        let token = direction
            .token(&self.page.meta)
            .ok_or_else(|| direction.exhausted())?
            .to_string();
        let context = self
            .context
            .as_ref()
            .ok_or(ResponseError::MissingRequestContext)?;

        let mut query = context.previous_query.clone();
        query.remove(direction.opposite().param());
        query.insert(direction.param().to_string(), token);

        tracing::debug!(
            url = %context.previous_url,
            direction = ?direction,
            "Fetching adjacent page"
        );

        let response = context.transport.get(&context.previous_url, &query).await?;
        let page = Page::parse(response.body())?;

        self.page = page;
        Ok(self)
    }
}

impl<T> Tweets<T> {
    /// Returns the posts of the current page, in response order.
    #[must_use]
    pub fn posts(&self) -> &[Entity] {
        &self.page.posts
    }

    /// Iterates over the posts of the current page.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.page.posts.iter()
    }

    /// Returns the first post of the current page.
    #[must_use]
    pub fn first(&self) -> Option<&Entity> {
        self.page.posts.first()
    }

    /// Returns the last post of the current page.
    #[must_use]
    pub fn last(&self) -> Option<&Entity> {
        self.page.posts.last()
    }

    /// Returns the number of posts on the current page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.page.posts.len()
    }

    /// Returns `true` if the current page has no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page.posts.is_empty()
    }

    /// Returns the included entities of the current page.
    #[must_use]
    pub const fn resources(&self) -> &ResourceSet {
        &self.page.resources
    }

    /// Returns the pagination metadata of the current page.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.page.meta
    }

    /// Returns `true` if the current page carries a `next_token`.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page.meta.next_token().is_some()
    }

    /// Returns `true` if the current page carries a `previous_token`.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page.meta.previous_token().is_some()
    }

    /// Returns the body text the current page was decoded from.
    #[must_use]
    pub fn original_body(&self) -> &str {
        &self.page.original_body
    }

    /// Returns the stored request context, if any.
    #[must_use]
    pub const fn request_context(&self) -> Option<&RequestContext<T>> {
        self.context.as_ref()
    }
}

impl<'a, T> IntoIterator for &'a Tweets<T> {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.posts.iter()
    }
}

impl<T> fmt::Debug for Tweets<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweets")
            .field("posts", &self.page.posts)
            .field("resources", &self.page.resources)
            .field("meta", &self.page.meta)
            .field("context", &self.context)
            .finish()
    }
}
