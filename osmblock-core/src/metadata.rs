//! Optional editing metadata carried by OSM entities.

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Version reported when an entity carries no metadata.
pub const NO_VERSION: i32 = -1;

/// Changeset reported when an entity carries no metadata.
pub const NO_CHANGESET: i64 = -1;

/// The user who last edited an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Author {
    /// Numeric user id.
    pub uid: i32,
    /// Display name.
    pub name: String,
}

impl Author {
    /// Construct an author from a user id and display name.
    pub fn new(uid: i32, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
        }
    }
}

/// Version, timestamp, changeset and author of an entity.
///
/// Metadata is optional in the block format. Entities without it carry
/// [`Metadata::none`], whose version and changeset are the `-1` sentinels.
///
/// # Examples
/// ```
/// use osmblock_core::{Metadata, NO_CHANGESET, NO_VERSION};
///
/// let metadata = Metadata::none();
/// assert_eq!(metadata.version, NO_VERSION);
/// assert_eq!(metadata.changeset, NO_CHANGESET);
/// assert!(metadata.timestamp.is_none());
/// assert!(metadata.author.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    /// Entity version, or [`NO_VERSION`].
    pub version: i32,
    /// Time of the last edit, when recorded.
    pub timestamp: Option<DateTime<Utc>>,
    /// Changeset id, or [`NO_CHANGESET`].
    pub changeset: i64,
    /// Last editor, when both uid and name were recorded.
    pub author: Option<Author>,
}

impl Metadata {
    /// Metadata for an entity that carries none.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            version: NO_VERSION,
            timestamp: None,
            changeset: NO_CHANGESET,
            author: None,
        }
    }

    /// Returns true when this is the no-metadata default.
    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::none()
    }
}
