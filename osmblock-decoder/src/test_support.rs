//! Block encoder used by unit, behaviour and property tests.
//!
//! [`BlockEncoder`] applies the block format's delta and dictionary coding to
//! domain entities so tests can describe inputs as entities rather than raw
//! arrays.

use std::collections::HashMap;

use osmblock_core::{Bound, Metadata, Node, Relation, Tags, Way};

use crate::block::{
    DenseNodes, HeaderBBox, HeaderBlock, InfoRecord, PrimitiveBlock, PrimitiveGroup,
    RelationRecord, WayRecord,
};
use crate::scale::DEFAULT_GRANULARITY;
use crate::strings::StringTable;

/// Builds a [`PrimitiveBlock`] from entities.
///
/// Strings are interned on first use, with index `0` reserved for the empty
/// string. Timestamps are stored in whole seconds, matching the default date
/// granularity. Tag keys must not be empty: index `0` delimits dense runs.
#[derive(Debug, Clone)]
pub struct BlockEncoder {
    strings: Vec<String>,
    indices: HashMap<String, u32>,
    granularity: i32,
    groups: Vec<PrimitiveGroup>,
}

impl Default for BlockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEncoder {
    /// Create an encoder using the default coordinate granularity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: vec![String::new()],
            indices: HashMap::from([(String::new(), 0)]),
            granularity: DEFAULT_GRANULARITY,
            groups: Vec::new(),
        }
    }

    /// Use a different coordinate granularity in nanodegrees.
    #[must_use]
    pub fn with_granularity(mut self, granularity: i32) -> Self {
        self.granularity = granularity;
        self
    }

    /// Append a group holding the given entities, with nodes stored densely.
    pub fn push_group(
        &mut self,
        nodes: &[Node],
        ways: &[Way],
        relations: &[Relation],
    ) -> &mut Self {
        let dense = (!nodes.is_empty()).then(|| self.encode_dense(nodes));
        let encoded_ways = ways.iter().map(|way| self.encode_way(way)).collect();
        let encoded_relations = relations
            .iter()
            .map(|relation| self.encode_relation(relation))
            .collect();
        self.groups.push(PrimitiveGroup {
            nodes: Vec::new(),
            dense,
            ways: encoded_ways,
            relations: encoded_relations,
        });
        self
    }

    /// Append an already encoded group.
    pub fn push_raw_group(&mut self, group: PrimitiveGroup) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Intern a string and return its table index.
    pub fn intern(&mut self, value: &str) -> u32 {
        if let Some(&index) = self.indices.get(value) {
            return index;
        }
        let index = u32::try_from(self.strings.len()).unwrap_or(u32::MAX);
        self.strings.push(value.to_owned());
        self.indices.insert(value.to_owned(), index);
        index
    }

    /// Encode a run of nodes as dense arrays.
    pub fn encode_dense(&mut self, nodes: &[Node]) -> DenseNodes {
        let mut dense = DenseNodes::default();
        let (mut last_id, mut last_lat, mut last_lon) = (0_i64, 0_i64, 0_i64);
        let tagged = nodes.iter().any(|node| !node.tags.is_empty());
        let described = nodes.iter().any(|node| !node.metadata.is_none());
        for node in nodes {
            let lat = self.raw_coordinate(node.lat());
            let lon = self.raw_coordinate(node.lon());
            dense.id.push(node.id - last_id);
            dense.lat.push(lat - last_lat);
            dense.lon.push(lon - last_lon);
            (last_id, last_lat, last_lon) = (node.id, lat, lon);
            if tagged {
                for (key, value) in self.encode_tags(&node.tags) {
                    dense.keys_vals.push(as_signed(key));
                    dense.keys_vals.push(as_signed(value));
                }
                dense.keys_vals.push(0);
            }
            if described {
                let info = self.encode_info(&node.metadata).unwrap_or_default();
                dense.info.push(info);
            }
        }
        dense
    }

    /// Encode a way with delta-coded references.
    pub fn encode_way(&mut self, way: &Way) -> WayRecord {
        let (keys, vals) = self.encode_tags(&way.tags).into_iter().unzip();
        WayRecord {
            id: way.id,
            keys,
            vals,
            info: self.encode_info(&way.metadata),
            refs: delta_encode(way.refs.iter().copied()),
        }
    }

    /// Encode a relation with delta-coded member ids.
    pub fn encode_relation(&mut self, relation: &Relation) -> RelationRecord {
        let (keys, vals) = self.encode_tags(&relation.tags).into_iter().unzip();
        let roles_sid = relation
            .members
            .iter()
            .map(|member| as_signed(self.intern(&member.role)))
            .collect();
        RelationRecord {
            id: relation.id,
            keys,
            vals,
            info: self.encode_info(&relation.metadata),
            roles_sid,
            memids: delta_encode(relation.members.iter().map(|member| member.id)),
            types: relation
                .members
                .iter()
                .map(|member| member.kind.to_wire())
                .collect(),
        }
    }

    /// Encode metadata, returning `None` for the no-metadata default.
    pub fn encode_info(&mut self, metadata: &Metadata) -> Option<InfoRecord> {
        if metadata.is_none() {
            return None;
        }
        let (uid, user_sid) = match &metadata.author {
            Some(author) => (Some(author.uid), Some(as_signed(self.intern(&author.name)))),
            None => (None, None),
        };
        Some(InfoRecord {
            version: metadata.version,
            timestamp: metadata.timestamp.map(|instant| instant.timestamp()),
            changeset: metadata.changeset,
            uid,
            user_sid,
        })
    }

    /// Finish the block.
    #[must_use]
    pub fn finish(self) -> PrimitiveBlock {
        PrimitiveBlock {
            string_table: StringTable::new(self.strings),
            groups: self.groups,
            granularity: (self.granularity != DEFAULT_GRANULARITY).then_some(self.granularity),
            lat_offset: None,
            lon_offset: None,
            date_granularity: None,
        }
    }

    fn encode_tags(&mut self, tags: &Tags) -> Vec<(u32, u32)> {
        tags.iter()
            .map(|tag| (self.intern(&tag.key), self.intern(&tag.value)))
            .collect()
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "test encoder rounds degrees back to fixed-point units"
    )]
    fn raw_coordinate(&self, degrees: f64) -> i64 {
        (degrees * 1.0e9 / f64::from(self.granularity)).round() as i64
    }
}

/// Build a header block declaring the given bounds and required features.
#[must_use]
pub fn encode_header(bound: &Bound, required_features: &[&str]) -> HeaderBlock {
    HeaderBlock {
        bbox: HeaderBBox {
            left: nanodegrees(bound.left),
            right: nanodegrees(bound.right),
            top: nanodegrees(bound.top),
            bottom: nanodegrees(bound.bottom),
        },
        required_features: required_features
            .iter()
            .map(|&feature| feature.to_owned())
            .collect(),
        ..HeaderBlock::default()
    }
}

/// Delta-encode a sequence of absolute values.
pub fn delta_encode(values: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut last = 0_i64;
    values
        .into_iter()
        .map(|value| {
            let delta = value - last;
            last = value;
            delta
        })
        .collect()
}

fn as_signed(index: u32) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "test encoder rounds degrees back to nanodegrees"
)]
fn nanodegrees(degrees: f64) -> i64 {
    (degrees * 1.0e9).round() as i64
}
