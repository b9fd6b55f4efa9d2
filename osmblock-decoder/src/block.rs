//! Field-level view of a block, as produced by the wire layer.
//!
//! These records hold the encoding-optimised arrays exactly as stored:
//! delta-coded ids and coordinates, string table indices instead of
//! strings, and enumerants instead of member kinds. Decoding them into
//! domain entities is the job of the rest of this crate.

use crate::strings::StringTable;

/// Bounding box of a header block in nanodegrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderBBox {
    /// Western longitude.
    pub left: i64,
    /// Eastern longitude.
    pub right: i64,
    /// Northern latitude.
    pub top: i64,
    /// Southern latitude.
    pub bottom: i64,
}

/// The first block of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Declared bounds of the file.
    pub bbox: HeaderBBox,
    /// Features a reader must support to read the file.
    pub required_features: Vec<String>,
    /// Features a reader may take advantage of.
    pub optional_features: Vec<String>,
    /// Program that wrote the file, if recorded.
    pub writing_program: Option<String>,
    /// Data source recorded by the writer, if any. Logged, never used as
    /// the bound's origin.
    pub source: Option<String>,
}

/// Per-entity metadata as stored in a block.
///
/// Version and changeset default to `-1` when the writer omitted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRecord {
    /// Entity version.
    pub version: i32,
    /// Timestamp in units of the block's date granularity.
    pub timestamp: Option<i64>,
    /// Changeset id.
    pub changeset: i64,
    /// Numeric user id.
    pub uid: Option<i32>,
    /// String table index of the user name.
    pub user_sid: Option<i32>,
}

impl Default for InfoRecord {
    fn default() -> Self {
        Self {
            version: -1,
            timestamp: None,
            changeset: -1,
            uid: None,
            user_sid: None,
        }
    }
}

/// A node stored with absolute coordinates and paired tag indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node id.
    pub id: i64,
    /// Latitude in granularity units.
    pub lat: i64,
    /// Longitude in granularity units.
    pub lon: i64,
    /// Tag key indices.
    pub keys: Vec<u32>,
    /// Tag value indices, parallel to `keys`.
    pub vals: Vec<u32>,
    /// Optional metadata.
    pub info: Option<InfoRecord>,
}

/// A run of nodes stored as parallel delta-coded arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenseNodes {
    /// Delta-coded node ids.
    pub id: Vec<i64>,
    /// Delta-coded latitudes in granularity units.
    pub lat: Vec<i64>,
    /// Delta-coded longitudes in granularity units.
    pub lon: Vec<i64>,
    /// Flat `key, value, ..., 0` index runs, one per node; empty when no
    /// node in the run has tags.
    pub keys_vals: Vec<i32>,
    /// Metadata per node; empty when the writer stored none.
    pub info: Vec<InfoRecord>,
}

/// A way with paired tag indices and delta-coded node references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WayRecord {
    /// Way id.
    pub id: i64,
    /// Tag key indices.
    pub keys: Vec<u32>,
    /// Tag value indices, parallel to `keys`.
    pub vals: Vec<u32>,
    /// Optional metadata.
    pub info: Option<InfoRecord>,
    /// Delta-coded node references.
    pub refs: Vec<i64>,
}

/// A relation with paired tag indices and parallel member arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationRecord {
    /// Relation id.
    pub id: i64,
    /// Tag key indices.
    pub keys: Vec<u32>,
    /// Tag value indices, parallel to `keys`.
    pub vals: Vec<u32>,
    /// Optional metadata.
    pub info: Option<InfoRecord>,
    /// String table indices of member roles.
    pub roles_sid: Vec<i32>,
    /// Delta-coded member ids.
    pub memids: Vec<i64>,
    /// Member type enumerants: `0` node, `1` way, `2` relation.
    pub types: Vec<i32>,
}

/// One group of entities within a data block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimitiveGroup {
    /// Plain nodes.
    pub nodes: Vec<NodeRecord>,
    /// Dense nodes, if the group stores any.
    pub dense: Option<DenseNodes>,
    /// Ways.
    pub ways: Vec<WayRecord>,
    /// Relations.
    pub relations: Vec<RelationRecord>,
}

/// A data block: string table, scale parameters and entity groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimitiveBlock {
    /// Interned strings referenced by index from every group.
    pub string_table: StringTable,
    /// Entity groups in file order.
    pub groups: Vec<PrimitiveGroup>,
    /// Nanodegrees per coordinate unit; defaults to 100.
    pub granularity: Option<i32>,
    /// Latitude offset in nanodegrees; defaults to 0.
    pub lat_offset: Option<i64>,
    /// Longitude offset in nanodegrees; defaults to 0.
    pub lon_offset: Option<i64>,
    /// Milliseconds per timestamp unit; defaults to 1000.
    pub date_granularity: Option<i32>,
}

/// A block delivered by the file layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// The file header.
    Header(HeaderBlock),
    /// A data block.
    Primitive(PrimitiveBlock),
}

impl Block {
    /// Name of the block type as used in the file container.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Header(_) => "OSMHeader",
            Self::Primitive(_) => "OSMData",
        }
    }
}
