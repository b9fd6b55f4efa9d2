//! Way decoding.
use osmblock_core::{Entity, Way};

use crate::block::WayRecord;
use crate::delta::RunningSum;
use crate::error::{DecodeError, Section, Violation, ViolationContext};
use crate::metadata::resolve_metadata;
use crate::scale::BlockScale;
use crate::strings::StringTable;
use crate::tags::collect_tags;

/// Decode way records, appending one way per record in order.
///
/// Node references restart their running sum at zero for every way.
pub(crate) fn decode_ways(
    records: &[WayRecord],
    strings: &StringTable,
    scale: &BlockScale,
    out: &mut Vec<Entity>,
) -> Result<(), DecodeError> {
    for (index, record) in records.iter().enumerate() {
        out.push(Entity::Way(
            decode_way(record, strings, scale).at(Section::Ways, index)?,
        ));
    }
    Ok(())
}

fn decode_way(
    record: &WayRecord,
    strings: &StringTable,
    scale: &BlockScale,
) -> Result<Way, Violation> {
    Ok(Way {
        id: record.id,
        refs: RunningSum::decode_all("refs", &record.refs)?,
        tags: collect_tags(&record.keys, &record.vals, strings)?,
        metadata: resolve_metadata(record.info.as_ref(), strings, scale)?,
    })
}
