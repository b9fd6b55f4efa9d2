//! Key/value tags attached to OSM entities.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single OSM tag.
///
/// Tags mirror OpenStreetMap's free-form key/value structure. Entities keep
/// their tags in block order and duplicates are not collapsed.
///
/// # Examples
/// ```
/// use osmblock_core::Tag;
///
/// let tag = Tag::new("highway", "residential");
/// assert_eq!(tag.key, "highway");
/// assert_eq!(tag.value, "residential");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    /// Tag key, for example `name`.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Construct a tag from anything convertible into owned strings.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Tag {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Ordered tag list carried by every entity.
pub type Tags = Vec<Tag>;
