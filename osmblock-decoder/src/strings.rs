//! Per-block string table.

use crate::error::Violation;

/// Interned strings of one data block, addressed by index.
///
/// Index `0` conventionally holds the empty string so that it can double as
/// a delimiter in the dense tag arrays.
///
/// # Examples
/// ```
/// use osmblock_decoder::StringTable;
///
/// let table = StringTable::new(vec![String::new(), "name".into()]);
/// assert_eq!(table.lookup(1), Ok("name"));
/// assert!(table.lookup(2).is_err());
/// assert!(table.lookup(-1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<String>,
}

impl StringTable {
    /// Wrap the decoded strings of a block.
    #[must_use]
    pub const fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Resolve an index.
    ///
    /// # Errors
    /// Returns [`Violation::StringIndexOutOfRange`] when the index is
    /// negative or past the end of the table.
    pub fn lookup<I>(&self, index: I) -> Result<&str, Violation>
    where
        I: Into<i64>,
    {
        let raw = index.into();
        usize::try_from(raw)
            .ok()
            .and_then(|position| self.entries.get(position))
            .map(String::as_str)
            .ok_or(Violation::StringIndexOutOfRange {
                index: raw,
                len: self.entries.len(),
            })
    }

    /// Number of strings in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no strings.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for StringTable {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}

impl<S: Into<String>> FromIterator<S> for StringTable {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> StringTable {
        ["", "highway", "primary"].into_iter().collect()
    }

    #[rstest]
    #[case(0_i64, "")]
    #[case(1_i64, "highway")]
    #[case(2_i64, "primary")]
    fn resolves_indices_in_range(table: StringTable, #[case] index: i64, #[case] expected: &str) {
        assert_eq!(table.lookup(index), Ok(expected));
    }

    #[rstest]
    #[case(3_i64)]
    #[case(-1_i64)]
    #[case(i64::MAX)]
    fn rejects_indices_out_of_range(table: StringTable, #[case] index: i64) {
        assert_eq!(
            table.lookup(index),
            Err(Violation::StringIndexOutOfRange { index, len: 3 })
        );
    }

    #[rstest]
    fn accepts_unsigned_indices(table: StringTable) {
        assert_eq!(table.lookup(2_u32), Ok("primary"));
    }
}
