//! Relation decoding.
//!
//! Members are stored as three parallel arrays: delta-coded ids, role string
//! indices and type enumerants. Member order is kept exactly as stored.
use osmblock_core::{Entity, Member, MemberKind, Relation};

use crate::block::RelationRecord;
use crate::delta::RunningSum;
use crate::error::{DecodeError, Section, Violation, ViolationContext};
use crate::metadata::resolve_metadata;
use crate::scale::BlockScale;
use crate::strings::StringTable;
use crate::tags::collect_tags;

/// Decode relation records, appending one relation per record in order.
///
/// Member ids restart their running sum at zero for every relation. An
/// unknown member type fails the whole call.
pub(crate) fn decode_relations(
    records: &[RelationRecord],
    strings: &StringTable,
    scale: &BlockScale,
    out: &mut Vec<Entity>,
) -> Result<(), DecodeError> {
    for (index, record) in records.iter().enumerate() {
        out.push(Entity::Relation(
            decode_relation(record, strings, scale).at(Section::Relations, index)?,
        ));
    }
    Ok(())
}

fn decode_relation(
    record: &RelationRecord,
    strings: &StringTable,
    scale: &BlockScale,
) -> Result<Relation, Violation> {
    Ok(Relation {
        id: record.id,
        members: decode_members(record, strings)?,
        tags: collect_tags(&record.keys, &record.vals, strings)?,
        metadata: resolve_metadata(record.info.as_ref(), strings, scale)?,
    })
}

fn decode_members(record: &RelationRecord, strings: &StringTable) -> Result<Vec<Member>, Violation> {
    let expected = record.memids.len();
    for (field, actual) in [
        ("roles_sid", record.roles_sid.len()),
        ("types", record.types.len()),
    ] {
        if actual != expected {
            return Err(Violation::LengthMismatch {
                field,
                expected,
                actual,
            });
        }
    }

    let mut ids = RunningSum::new("memids");
    record
        .memids
        .iter()
        .zip(&record.roles_sid)
        .zip(&record.types)
        .map(|((&id_delta, &role_sid), &raw_kind)| {
            let id = ids.advance(id_delta)?;
            let kind = MemberKind::from_wire(raw_kind)
                .ok_or(Violation::UnknownMemberKind { value: raw_kind })?;
            Ok(Member::new(id, kind, strings.lookup(role_sid)?))
        })
        .collect()
}
