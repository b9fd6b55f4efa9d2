//! Plain node decoding.
//!
//! Plain nodes carry absolute ids and coordinates; only the scale of the
//! block applies.
use geo::Coord;
use osmblock_core::{Entity, Node};

use crate::block::NodeRecord;
use crate::error::{DecodeError, Section, ViolationContext};
use crate::metadata::resolve_metadata;
use crate::scale::BlockScale;
use crate::strings::StringTable;
use crate::tags::collect_tags;

/// Decode plain node records, appending one node per record in order.
pub(crate) fn decode_nodes(
    records: &[NodeRecord],
    strings: &StringTable,
    scale: &BlockScale,
    out: &mut Vec<Entity>,
) -> Result<(), DecodeError> {
    for (index, record) in records.iter().enumerate() {
        let tags = collect_tags(&record.keys, &record.vals, strings).at(Section::Nodes, index)?;
        let metadata =
            resolve_metadata(record.info.as_ref(), strings, scale).at(Section::Nodes, index)?;
        out.push(Entity::Node(Node {
            id: record.id,
            location: Coord {
                x: scale.lon(record.lon),
                y: scale.lat(record.lat),
            },
            tags,
            metadata,
        }));
    }
    Ok(())
}
