//! Pagination metadata from the `meta` section.

use serde_json::{Map, Value};

use crate::response::ResponseError;

/// The `meta` object of a response.
///
/// Tokens are opaque and returned verbatim; nothing here validates them.
/// A response without `meta` yields an empty `PageMeta`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tweetkit::response::PageMeta;
///
/// let meta = json!({"result_count": 10, "next_token": "b26v89c19zqg8o3f"});
/// let meta = PageMeta::from_meta(Some(&meta)).unwrap();
///
/// assert_eq!(meta.next_token(), Some("b26v89c19zqg8o3f"));
/// assert_eq!(meta.previous_token(), None);
/// assert_eq!(meta.result_count(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    data: Map<String, Value>,
}

impl PageMeta {
    /// Builds the metadata from a response's `meta` value.
    ///
    /// `None` and JSON `null` are treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::UnexpectedShape`] if `meta` is present but
    /// not an object.
    pub fn from_meta(meta: Option<&Value>) -> Result<Self, ResponseError> {
        match meta {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(data)) => Ok(Self { data: data.clone() }),
            Some(_) => Err(ResponseError::UnexpectedShape {
                section: "meta".to_string(),
                expected: "an object",
            }),
        }
    }

    /// Returns the token for the next page, if any.
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.string("next_token")
    }

    /// Returns the token for the previous page, if any.
    #[must_use]
    pub fn previous_token(&self) -> Option<&str> {
        self.string("previous_token")
    }

    /// Returns the number of posts the API reported for this page.
    #[must_use]
    pub fn result_count(&self) -> Option<u64> {
        self.data.get("result_count").and_then(Value::as_u64)
    }

    /// Returns the identifier of the newest post on this page.
    #[must_use]
    pub fn newest_id(&self) -> Option<&str> {
        self.string("newest_id")
    }

    /// Returns the identifier of the oldest post on this page.
    #[must_use]
    pub fn oldest_id(&self) -> Option<&str> {
        self.string("oldest_id")
    }

    /// Returns any other `meta` field by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    fn string(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Value::as_str)
    }
}
