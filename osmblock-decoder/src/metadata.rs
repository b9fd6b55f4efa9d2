//! Shared metadata and author resolution.
//!
//! Every entity kind goes through [`resolve_metadata`], so absent records,
//! partial author fields and timestamps follow one policy everywhere.
use osmblock_core::{Author, Metadata};

use crate::block::InfoRecord;
use crate::error::Violation;
use crate::scale::BlockScale;
use crate::strings::StringTable;

/// Turn an optional stored record into entity metadata.
///
/// Absent records give [`Metadata::none`]. Version and changeset are copied
/// verbatim. The author is only set when both uid and name index are present.
pub(crate) fn resolve_metadata(
    record: Option<&InfoRecord>,
    strings: &StringTable,
    scale: &BlockScale,
) -> Result<Metadata, Violation> {
    let Some(info) = record else {
        return Ok(Metadata::none());
    };
    let timestamp = info
        .timestamp
        .map(|raw| scale.timestamp(raw))
        .transpose()?;
    Ok(Metadata {
        version: info.version,
        timestamp,
        changeset: info.changeset,
        author: resolve_author(info, strings)?,
    })
}

fn resolve_author(info: &InfoRecord, strings: &StringTable) -> Result<Option<Author>, Violation> {
    match (info.uid, info.user_sid) {
        (Some(uid), Some(user_sid)) => Ok(Some(Author::new(uid, strings.lookup(user_sid)?))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn strings() -> StringTable {
        ["", "alice"].into_iter().collect()
    }

    fn full_info() -> InfoRecord {
        InfoRecord {
            version: 4,
            timestamp: Some(1_600_000_000),
            changeset: 991,
            uid: Some(17),
            user_sid: Some(1),
        }
    }

    #[rstest]
    fn absent_record_yields_sentinels(strings: StringTable) {
        let metadata =
            resolve_metadata(None, &strings, &BlockScale::default()).expect("resolves");
        assert!(metadata.is_none());
    }

    #[rstest]
    fn present_record_passes_fields_through(strings: StringTable) {
        let metadata = resolve_metadata(Some(&full_info()), &strings, &BlockScale::default())
            .expect("resolves");
        assert_eq!(metadata.version, 4);
        assert_eq!(metadata.changeset, 991);
        assert_eq!(metadata.author, Some(Author::new(17, "alice")));
        assert_eq!(
            metadata.timestamp.map(|instant| instant.timestamp()),
            Some(1_600_000_000)
        );
    }

    #[rstest]
    #[case(None, Some(1))]
    #[case(Some(17), None)]
    #[case(None, None)]
    fn partial_author_fields_yield_no_author(
        strings: StringTable,
        #[case] uid: Option<i32>,
        #[case] user_sid: Option<i32>,
    ) {
        let info = InfoRecord {
            uid,
            user_sid,
            ..full_info()
        };
        let metadata =
            resolve_metadata(Some(&info), &strings, &BlockScale::default()).expect("resolves");
        assert_eq!(metadata.author, None);
        assert_eq!(metadata.version, 4);
    }

    #[rstest]
    fn missing_timestamp_stays_absent(strings: StringTable) {
        let info = InfoRecord {
            timestamp: None,
            ..full_info()
        };
        let metadata =
            resolve_metadata(Some(&info), &strings, &BlockScale::default()).expect("resolves");
        assert!(metadata.timestamp.is_none());
    }

    #[rstest]
    fn unknown_author_name_is_a_violation(strings: StringTable) {
        let info = InfoRecord {
            user_sid: Some(5),
            ..full_info()
        };
        let err = resolve_metadata(Some(&info), &strings, &BlockScale::default())
            .expect_err("name index out of range");
        assert_eq!(err, Violation::StringIndexOutOfRange { index: 5, len: 2 });
    }
}
