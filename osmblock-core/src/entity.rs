//! Nodes, ways, relations and bounds reconstructed from a block.

use geo::{Coord, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Metadata, Tags};

/// A point on the map.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use osmblock_core::{Metadata, Node};
///
/// let node = Node {
///     id: 1,
///     location: Coord { x: 13.4, y: 52.5 },
///     tags: Vec::new(),
///     metadata: Metadata::none(),
/// };
/// assert_eq!(node.lat(), 52.5);
/// assert_eq!(node.lon(), 13.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// OSM node id.
    pub id: i64,
    /// Position in degrees.
    pub location: Coord<f64>,
    /// Tags in block order.
    pub tags: Tags,
    /// Editing metadata, or [`Metadata::none`].
    pub metadata: Metadata,
}

impl Node {
    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.x
    }
}

/// An ordered list of node references.
///
/// A way may revisit a node, so `refs` can contain repeated ids.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Way {
    /// OSM way id.
    pub id: i64,
    /// Referenced node ids in path order.
    pub refs: Vec<i64>,
    /// Tags in block order.
    pub tags: Tags,
    /// Editing metadata, or [`Metadata::none`].
    pub metadata: Metadata,
}

/// The kind of entity a relation member points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberKind {
    /// A node member.
    Node,
    /// A way member.
    Way,
    /// A nested relation member.
    Relation,
}

impl MemberKind {
    /// Map the block's member type enumerant to a kind.
    ///
    /// Returns `None` for values outside `0..=2`.
    ///
    /// # Examples
    /// ```
    /// use osmblock_core::MemberKind;
    ///
    /// assert_eq!(MemberKind::from_wire(1), Some(MemberKind::Way));
    /// assert_eq!(MemberKind::from_wire(7), None);
    /// ```
    #[must_use]
    pub const fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Node),
            1 => Some(Self::Way),
            2 => Some(Self::Relation),
            _ => None,
        }
    }

    /// The enumerant used for this kind in the block format.
    #[must_use]
    pub const fn to_wire(self) -> i32 {
        match self {
            Self::Node => 0,
            Self::Way => 1,
            Self::Relation => 2,
        }
    }
}

/// One member of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Id of the referenced entity.
    pub id: i64,
    /// Kind of the referenced entity.
    pub kind: MemberKind,
    /// Role of the member within the relation, possibly empty.
    pub role: String,
}

impl Member {
    /// Construct a relation member.
    pub fn new(id: i64, kind: MemberKind, role: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            role: role.into(),
        }
    }
}

/// A group of members with roles.
///
/// Member order is meaningful (route sequencing, for instance) and is kept
/// exactly as stored in the block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// OSM relation id.
    pub id: i64,
    /// Members in block order.
    pub members: Vec<Member>,
    /// Tags in block order.
    pub tags: Tags,
    /// Editing metadata, or [`Metadata::none`].
    pub metadata: Metadata,
}

/// The bounding region a file header declares.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bound {
    /// Eastern longitude.
    pub right: f64,
    /// Western longitude.
    pub left: f64,
    /// Northern latitude.
    pub top: f64,
    /// Southern latitude.
    pub bottom: f64,
    /// Where the data came from.
    pub origin: String,
}

impl Bound {
    /// The bounds as a `geo` rectangle (`x = longitude`, `y = latitude`).
    ///
    /// `Rect::new` normalises corners, so inverted bounds still produce a
    /// valid rectangle.
    ///
    /// # Examples
    /// ```
    /// use osmblock_core::Bound;
    ///
    /// let bound = Bound {
    ///     right: 1.0,
    ///     left: 0.0,
    ///     top: 0.5,
    ///     bottom: -0.5,
    ///     origin: String::new(),
    /// };
    /// let rect = bound.to_rect();
    /// assert_eq!(rect.min().x, 0.0);
    /// assert_eq!(rect.max().y, 0.5);
    /// ```
    #[must_use]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.left,
                y: self.bottom,
            },
            Coord {
                x: self.right,
                y: self.top,
            },
        )
    }
}

/// Anything a decoder hands to an [`EntitySink`](crate::EntitySink).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Entity {
    /// Declared file bounds from a header block.
    Bound(Bound),
    /// A node from a data block.
    Node(Node),
    /// A way from a data block.
    Way(Way),
    /// A relation from a data block.
    Relation(Relation),
}

impl Entity {
    /// Short lowercase name of the entity kind, for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bound(_) => "bound",
            Self::Node(_) => "node",
            Self::Way(_) => "way",
            Self::Relation(_) => "relation",
        }
    }

    /// The entity id, if the entity has one.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Bound(_) => None,
            Self::Node(node) => Some(node.id),
            Self::Way(way) => Some(way.id),
            Self::Relation(relation) => Some(relation.id),
        }
    }
}

impl From<Bound> for Entity {
    fn from(value: Bound) -> Self {
        Self::Bound(value)
    }
}

impl From<Node> for Entity {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Way> for Entity {
    fn from(value: Way) -> Self {
        Self::Way(value)
    }
}

impl From<Relation> for Entity {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}
