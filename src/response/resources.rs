//! Normalization of the `includes` section.
//!
//! Each category under `includes` (users, media, referenced tweets, ...) is
//! turned into a [`ResourceIndex`] keyed by identifier, so that a post's
//! `author_id` or `attachments.media_keys` can be resolved in O(1).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::response::entity::{canonical_identifier, Entity, Identifier};
use crate::response::ResponseError;

/// The categories of included entities exposed by [`ResourceSet::category`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// `includes.users`
    Users,
    /// `includes.tweets`
    Tweets,
    /// `includes.media`
    Media,
}

impl ResourceCategory {
    /// Every recognized category.
    pub const ALL: [Self; 3] = [Self::Users, Self::Tweets, Self::Media];

    /// Returns the key used for this category under `includes`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tweets => "tweets",
            Self::Media => "media",
        }
    }

    /// Parses a category name, returning `None` for unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields tried, in order, as the normalization key of a category.
///
/// `id` is the key everywhere. Media objects from the v2 API carry
/// `media_key` instead, so media falls back to it when `id` is absent.
fn normalization_keys(category: &str) -> &'static [&'static str] {
    match ResourceCategory::from_name(category) {
        Some(ResourceCategory::Media) => &["id", "media_key"],
        _ => &["id"],
    }
}

/// Identifier-keyed lookup table for one category of included entities.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tweetkit::response::ResourceIndex;
///
/// let users = json!([
///     {"id": "12", "username": "jack"},
///     {"id": "13", "username": "biz"},
/// ]);
/// let index = ResourceIndex::from_value(&users, "users").unwrap();
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.lookup("12").unwrap().attribute("username").unwrap(), "jack");
/// assert_eq!(index.lookup(13).unwrap().attribute("username").unwrap(), "biz");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceIndex {
    category: String,
    entries: HashMap<String, Entity>,
}

impl ResourceIndex {
    /// Creates an empty index for `category`.
    #[must_use]
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entries: HashMap::new(),
        }
    }

    /// Builds an index from the JSON array of one `includes` category.
    ///
    /// When two entries share a canonical identifier, the later one wins.
    /// This includes ids that differ only by leading zeros or whitespace
    /// (see [`canonical_identifier`]).
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::UnexpectedShape`] if `value` is not an array,
    /// or [`ResponseError::MalformedEntity`] if an entry has no identifier.
    pub fn from_value(value: &Value, category: &str) -> Result<Self, ResponseError> {
        let section = format!("includes.{category}");
        let items = value.as_array().ok_or_else(|| ResponseError::UnexpectedShape {
            section: section.clone(),
            expected: "an array",
        })?;

        let key_fields = normalization_keys(category);
        let mut index = Self::empty(category);
        for (position, item) in items.iter().enumerate() {
            let entity = Entity::with_key_fields(item.clone(), key_fields, &section, position)?;
            let key = canonical_identifier(entity.identifier());
            if index.entries.insert(key, entity).is_some() {
                tracing::trace!(
                    category,
                    position,
                    "Duplicate identifier in includes, keeping the later entry"
                );
            }
        }

        Ok(index)
    }

    /// Returns the category this index was built for.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Looks up an entity by identifier.
    ///
    /// Accepts string or integer keys; see [`Identifier`].
    #[must_use]
    pub fn lookup(&self, key: impl Identifier) -> Option<&Entity> {
        self.entries
            .get(&canonical_identifier(&key.as_identifier()))
    }

    /// Returns `true` if an entity with this identifier is present.
    #[must_use]
    pub fn contains(&self, key: impl Identifier) -> bool {
        self.lookup(key).is_some()
    }

    /// Iterates over `(canonical identifier, entity)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the entities in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &Entity> {
        self.entries.values()
    }

    /// Returns the number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All included entities of one response, indexed per category.
///
/// The recognized categories (`users`, `tweets`, `media`) are always
/// present; a category missing from the response is an empty index.
/// Any other category found under `includes` (e.g. `places`, `polls`) is
/// indexed as well, but [`category`](Self::category) does not expose it.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tweetkit::response::ResourceSet;
///
/// let includes = json!({"users": [{"id": "12", "username": "jack"}]});
/// let resources = ResourceSet::from_includes(Some(&includes)).unwrap();
///
/// assert_eq!(resources.users().len(), 1);
/// assert!(resources.category("media").unwrap().is_empty());
/// assert!(resources.category("places").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSet {
    users: ResourceIndex,
    tweets: ResourceIndex,
    media: ResourceIndex,
    unrecognized: HashMap<String, ResourceIndex>,
}

impl Default for ResourceSet {
    fn default() -> Self {
        Self {
            users: ResourceIndex::empty(ResourceCategory::Users.as_str()),
            tweets: ResourceIndex::empty(ResourceCategory::Tweets.as_str()),
            media: ResourceIndex::empty(ResourceCategory::Media.as_str()),
            unrecognized: HashMap::new(),
        }
    }
}

impl ResourceSet {
    /// Builds the set from a response's `includes` value.
    ///
    /// `None` and JSON `null` give a set of empty categories.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::UnexpectedShape`] if `includes` is not an
    /// object or a category is not an array, or
    /// [`ResponseError::MalformedEntity`] if an entity has no identifier.
    pub fn from_includes(includes: Option<&Value>) -> Result<Self, ResponseError> {
        let mut set = Self::default();

        let includes = match includes {
            None | Some(Value::Null) => return Ok(set),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ResponseError::UnexpectedShape {
                    section: "includes".to_string(),
                    expected: "an object",
                })
            }
        };

        for (name, value) in includes {
            let index = ResourceIndex::from_value(value, name)?;
            match ResourceCategory::from_name(name) {
                Some(ResourceCategory::Users) => set.users = index,
                Some(ResourceCategory::Tweets) => set.tweets = index,
                Some(ResourceCategory::Media) => set.media = index,
                None => {
                    set.unrecognized.insert(name.clone(), index);
                }
            }
        }

        Ok(set)
    }

    /// Returns the index for a recognized category name.
    ///
    /// Unrecognized names return `None`, even when the response contained
    /// them and they were indexed.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&ResourceIndex> {
        ResourceCategory::from_name(name).map(|category| self.get(category))
    }

    /// Returns the index for a recognized category.
    #[must_use]
    pub const fn get(&self, category: ResourceCategory) -> &ResourceIndex {
        match category {
            ResourceCategory::Users => &self.users,
            ResourceCategory::Tweets => &self.tweets,
            ResourceCategory::Media => &self.media,
        }
    }

    /// Returns the `users` index.
    #[must_use]
    pub const fn users(&self) -> &ResourceIndex {
        &self.users
    }

    /// Returns the `tweets` index (referenced and quoted posts).
    #[must_use]
    pub const fn tweets(&self) -> &ResourceIndex {
        &self.tweets
    }

    /// Returns the `media` index.
    #[must_use]
    pub const fn media(&self) -> &ResourceIndex {
        &self.media
    }

    /// Returns the names of every category that was indexed, sorted.
    ///
    /// Includes the recognized categories (even if empty) and any
    /// unrecognized ones found in the response.
    #[must_use]
    pub fn indexed_categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unrecognized.keys().map(String::as_str).collect();
        for category in ResourceCategory::ALL {
            names.push(category.as_str());
        }
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_names_round_trip() {
        for category in ResourceCategory::ALL {
            assert_eq!(ResourceCategory::from_name(category.as_str()), Some(category));
        }
        assert_eq!(ResourceCategory::from_name("places"), None);
        assert_eq!(ResourceCategory::Media.to_string(), "media");
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let users = json!([
            {"id": "1", "username": "first"},
            {"id": "2", "username": "other"},
            {"id": "1", "username": "second"},
        ]);
        let index = ResourceIndex::from_value(&users, "users").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup("1").unwrap().attribute("username").unwrap(),
            "second"
        );
    }

    #[test]
    fn test_lookup_coerces_numeric_keys() {
        let index =
            ResourceIndex::from_value(&json!([{"id": "2244994945"}]), "users").unwrap();

        assert!(index.contains("2244994945"));
        assert!(index.contains(2_244_994_945_u64));
        assert!(index.contains(String::from("2244994945")));
        assert!(!index.contains(1));
    }

    #[test]
    fn test_lookup_matches_numeric_wire_ids() {
        let index = ResourceIndex::from_value(&json!([{"id": 99}]), "users").unwrap();
        assert!(index.contains("99"));
        assert!(index.contains(99));
    }

    #[test]
    fn test_lookup_round_trips_every_entity() {
        let users = json!([
            {"id": "10", "name": "a"},
            {"id": "11", "name": "b"},
            {"id": "12", "name": "c"},
        ]);
        let index = ResourceIndex::from_value(&users, "users").unwrap();

        for entity in index.values() {
            let found = index.lookup(entity.identifier()).unwrap();
            assert_eq!(found.attributes(), entity.attributes());
        }
    }

    #[test]
    fn test_iteration_is_restartable() {
        let index = ResourceIndex::from_value(&json!([{"id": "1"}, {"id": "2"}]), "tweets").unwrap();

        let mut first: Vec<&str> = index.iter().map(|(k, _)| k).collect();
        let mut second: Vec<&str> = index.iter().map(|(k, _)| k).collect();
        first.sort_unstable();
        second.sort_unstable();

        assert_eq!(first, vec!["1", "2"]);
        assert_eq!(first, second);
        assert_eq!(index.values().count(), 2);
    }

    #[test]
    fn test_media_keyed_by_media_key() {
        let media = json!([
            {"media_key": "3_1", "type": "photo"},
            {"media_key": "7_2", "type": "video"},
        ]);
        let index = ResourceIndex::from_value(&media, "media").unwrap();

        assert_eq!(index.category(), "media");
        assert_eq!(index.lookup("7_2").unwrap().attribute("type").unwrap(), "video");
    }

    #[test]
    fn test_media_without_id_or_media_key_is_malformed() {
        let media = json!([{"media_key": "3_1"}, {"type": "photo"}]);
        let result = ResourceIndex::from_value(&media, "media");
        assert!(matches!(
            result,
            Err(ResponseError::MalformedEntity { ref section, index: 1, .. })
                if section == "includes.media"
        ));
    }

    #[test]
    fn test_indexed_categories_without_unrecognized() {
        let set = ResourceSet::from_includes(None).unwrap();
        assert_eq!(set.indexed_categories(), vec!["media", "tweets", "users"]);
    }

    #[test]
    fn test_zero_padded_ids_share_one_key() {
        let users = json!([
            {"id": "7", "username": "plain"},
            {"id": "007", "username": "padded"},
        ]);
        let index = ResourceIndex::from_value(&users, "users").unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.lookup("7").unwrap().attribute("username").unwrap(),
            "padded"
        );
        assert_eq!(index.lookup(7).unwrap().identifier(), "007");
    }

    #[test]
    fn test_users_without_id_are_malformed() {
        let result = ResourceIndex::from_value(&json!([{"id": "1"}, {"username": "x"}]), "users");
        assert!(matches!(
            result,
            Err(ResponseError::MalformedEntity { ref section, index: 1, .. })
                if section == "includes.users"
        ));
    }

    #[test]
    fn test_non_array_category_is_rejected() {
        let result = ResourceIndex::from_value(&json!({"id": "1"}), "users");
        assert!(matches!(
            result,
            Err(ResponseError::UnexpectedShape { expected: "an array", .. })
        ));
    }

    #[test]
    fn test_absent_includes_gives_present_but_empty_categories() {
        let set = ResourceSet::from_includes(None).unwrap();

        for name in ["users", "tweets", "media"] {
            let index = set.category(name).unwrap();
            assert!(index.is_empty());
            assert_eq!(index.category(), name);
        }
        assert_eq!(set, ResourceSet::from_includes(Some(&Value::Null)).unwrap());
    }

    #[test]
    fn test_unrecognized_categories_are_indexed_but_hidden() {
        let includes = json!({
            "users": [{"id": "1"}],
            "places": [{"id": "01a9a39529b27f36", "full_name": "Manhattan, NY"}],
        });
        let set = ResourceSet::from_includes(Some(&includes)).unwrap();

        assert!(set.category("places").is_none());
        assert_eq!(set.indexed_categories(), vec!["media", "places", "tweets", "users"]);
        assert_eq!(set.users().len(), 1);
        assert!(set.tweets().is_empty());
    }

    #[test]
    fn test_typed_and_named_access_agree() {
        let includes = json!({"tweets": [{"id": "5", "text": "quoted"}]});
        let set = ResourceSet::from_includes(Some(&includes)).unwrap();

        assert_eq!(set.category("tweets"), Some(set.get(ResourceCategory::Tweets)));
        assert_eq!(set.tweets().lookup("5").unwrap().text(), Some("quoted"));
    }

    #[test]
    fn test_non_object_includes_is_rejected() {
        let result = ResourceSet::from_includes(Some(&json!([])));
        assert!(matches!(
            result,
            Err(ResponseError::UnexpectedShape { ref section, .. }) if section == "includes"
        ));
    }
}
