//! Tag resolution for records that store keys and values side by side.
use osmblock_core::{Tag, Tags};

use crate::error::Violation;
use crate::strings::StringTable;

/// Resolve parallel key and value index lists into tags, keeping order.
pub(crate) fn collect_tags(
    keys: &[u32],
    vals: &[u32],
    strings: &StringTable,
) -> Result<Tags, Violation> {
    if keys.len() != vals.len() {
        return Err(Violation::LengthMismatch {
            field: "vals",
            expected: keys.len(),
            actual: vals.len(),
        });
    }
    keys.iter()
        .zip(vals)
        .map(|(&key, &value)| Ok(Tag::new(strings.lookup(key)?, strings.lookup(value)?)))
        .collect()
}
