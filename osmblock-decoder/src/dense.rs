//! Dense node decoding.
//!
//! Dense nodes store a run of nodes as parallel arrays. Ids and coordinates
//! are delta-coded across the whole run, and the tags of all nodes share one
//! flat array of `key, value, ..., 0` index runs.
use geo::Coord;
use log::warn;
use osmblock_core::{Entity, Node, Tag, Tags};

use crate::block::DenseNodes;
use crate::delta::RunningSum;
use crate::error::{DecodeError, Section, Violation, ViolationContext};
use crate::metadata::resolve_metadata;
use crate::scale::BlockScale;
use crate::strings::StringTable;

/// Position in the flat dense tag array.
///
/// Each call to [`TagCursor::read_tags`] consumes one node's run and returns
/// the cursor for the next node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TagCursor {
    position: usize,
}

impl TagCursor {
    pub(crate) const fn position(self) -> usize {
        self.position
    }

    /// Read `key, value` pairs up to and including the next `0` delimiter.
    pub(crate) fn read_tags(
        self,
        keys_vals: &[i32],
        strings: &StringTable,
    ) -> Result<(Tags, Self), Violation> {
        let mut tags = Tags::new();
        let mut position = self.position;
        loop {
            let key = *keys_vals
                .get(position)
                .ok_or(Violation::UnterminatedTags { position })?;
            if key == 0 {
                return Ok((
                    tags,
                    Self {
                        position: position + 1,
                    },
                ));
            }
            let value_position = position + 1;
            let value = *keys_vals
                .get(value_position)
                .ok_or(Violation::UnterminatedTags {
                    position: value_position,
                })?;
            tags.push(Tag::new(strings.lookup(key)?, strings.lookup(value)?));
            position += 2;
        }
    }
}

/// Decode a dense node run, appending one node per index in array order.
pub(crate) fn decode_dense(
    dense: &DenseNodes,
    strings: &StringTable,
    scale: &BlockScale,
    out: &mut Vec<Entity>,
) -> Result<(), DecodeError> {
    check_lengths(dense)?;

    let mut ids = RunningSum::new("id");
    let mut lats = RunningSum::new("lat");
    let mut lons = RunningSum::new("lon");
    let mut cursor = TagCursor::default();
    let has_tags = !dense.keys_vals.is_empty();

    let deltas = dense.id.iter().zip(&dense.lat).zip(&dense.lon);
    for (index, ((&id_delta, &lat_delta), &lon_delta)) in deltas.enumerate() {
        let id = ids.advance(id_delta).at(Section::DenseNodes, index)?;
        let lat = lats.advance(lat_delta).at(Section::DenseNodes, index)?;
        let lon = lons.advance(lon_delta).at(Section::DenseNodes, index)?;

        let tags = if has_tags {
            let (tags, next) = cursor
                .read_tags(&dense.keys_vals, strings)
                .at(Section::DenseNodes, index)?;
            cursor = next;
            tags
        } else {
            Tags::new()
        };
        let metadata =
            resolve_metadata(dense.info.get(index), strings, scale).at(Section::DenseNodes, index)?;

        out.push(Entity::Node(Node {
            id,
            location: Coord {
                x: scale.lon(lon),
                y: scale.lat(lat),
            },
            tags,
            metadata,
        }));
    }

    if has_tags && cursor.position() < dense.keys_vals.len() {
        warn!(
            "Ignored {} trailing dense tag entries after {} nodes",
            dense.keys_vals.len() - cursor.position(),
            dense.id.len()
        );
    }
    Ok(())
}

fn check_lengths(dense: &DenseNodes) -> Result<(), DecodeError> {
    let expected = dense.id.len();
    let parallel = [
        ("lat", dense.lat.len()),
        ("lon", dense.lon.len()),
        // Metadata is optional for the whole run, but never partial.
        ("info", if dense.info.is_empty() { expected } else { dense.info.len() }),
    ];
    for (field, actual) in parallel {
        if actual != expected {
            return Err(DecodeError::structural(
                Section::DenseNodes,
                expected.min(actual),
                Violation::LengthMismatch {
                    field,
                    expected,
                    actual,
                },
            ));
        }
    }
    Ok(())
}
