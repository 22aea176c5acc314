//! A single post, user or media record.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::response::ResponseError;

/// A value that can be used to look up an entity by identifier.
///
/// Identifiers are strings on the wire, but callers often hold them as
/// integers. Both forms map to the same canonical key, so
/// `index.lookup(42)` and `index.lookup("42")` find the same entity.
pub trait Identifier {
    /// Returns the identifier in its wire (string) form.
    fn as_identifier(&self) -> Cow<'_, str>;
}

impl Identifier for str {
    fn as_identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Identifier for String {
    fn as_identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: Identifier + ?Sized> Identifier for &T {
    fn as_identifier(&self) -> Cow<'_, str> {
        (**self).as_identifier()
    }
}

macro_rules! integer_identifier {
    ($($ty:ty),*) => {
        $(
            impl Identifier for $ty {
                fn as_identifier(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

integer_identifier!(u32, u64, u128, usize, i32, i64, i128);

/// Normalizes an identifier to the key used inside a
/// [`ResourceIndex`](crate::response::ResourceIndex).
///
/// Surrounding whitespace is dropped and an all-digit identifier loses its
/// leading zeros, so `"0042"`, `" 42"` and `42` share one key.
///
/// Distinct wire ids that normalize alike (`"7"` and `"007"`) therefore
/// collide inside an index, and the later entry replaces the earlier one.
#[must_use]
pub fn canonical_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let digits = trimmed.trim_start_matches('0');
        if digits.is_empty() {
            return "0".to_string();
        }
        return digits.to_string();
    }
    trimmed.to_string()
}

/// A normalized record from `data` or from an `includes` category.
///
/// The identifier is extracted once at construction; every other field is
/// reachable through [`attribute`](Self::attribute).
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tweetkit::response::Entity;
///
/// let post = Entity::from_value(json!({"id": "20", "text": "just setting up"}), "data", 0)
///     .unwrap();
///
/// assert_eq!(post.identifier(), "20");
/// assert_eq!(post.text(), Some("just setting up"));
/// assert!(post.attribute("lang").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: String,
    attributes: Map<String, Value>,
}

impl Entity {
    /// Builds an entity keyed by its `id` field.
    ///
    /// `section` and `index` only feed the error message.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::MalformedEntity`] if `value` is not an
    /// object, or its `id` is missing, empty, or not a string or integer.
    pub fn from_value(value: Value, section: &str, index: usize) -> Result<Self, ResponseError> {
        Self::with_key_fields(value, &["id"], section, index)
    }

    /// Builds an entity keyed by the first of `key_fields` that is present.
    pub(crate) fn with_key_fields(
        value: Value,
        key_fields: &[&str],
        section: &str,
        index: usize,
    ) -> Result<Self, ResponseError> {
        let malformed = |reason| ResponseError::MalformedEntity {
            section: section.to_string(),
            index,
            reason,
        };

        let Value::Object(attributes) = value else {
            return Err(malformed("not a JSON object"));
        };

        let raw_id = key_fields
            .iter()
            .find_map(|field| attributes.get(*field).filter(|v| !v.is_null()))
            .ok_or_else(|| malformed("missing 'id' field"))?;

        let id = match raw_id {
            Value::String(s) => s.clone(),
            Value::Number(n) if n.is_u64() || n.is_i64() => n.to_string(),
            _ => return Err(malformed("'id' must be a string or an integer")),
        };
        if id.trim().is_empty() {
            return Err(malformed("empty 'id' field"));
        }

        Ok(Self { id, attributes })
    }

    /// Returns the entity's identifier as it appeared on the wire.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.id
    }

    /// Returns the named field, or `None` if it is missing.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns the `text` field of a post.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.attribute("text").and_then(Value::as_str)
    }

    /// Returns every field of the entity, `id` included.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Consumes the entity, returning its fields.
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    /// Deserializes the entity's fields into a caller-defined type.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the fields don't fit `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use serde_json::json;
    /// use tweetkit::response::Entity;
    ///
    /// #[derive(Deserialize)]
    /// struct User {
    ///     id: String,
    ///     username: String,
    /// }
    ///
    /// let entity = Entity::from_value(json!({"id": "12", "username": "jack"}), "data", 0)
    ///     .unwrap();
    /// let user: User = entity.deserialize().unwrap();
    /// assert_eq!(user.username, "jack");
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.attributes.clone()))
    }
}
