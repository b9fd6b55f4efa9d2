//! Error types raised while decoding blocks.

use std::fmt;

use thiserror::Error;

/// The part of a block in which a violation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The file header block.
    Header,
    /// Plain (non-dense) node records.
    Nodes,
    /// The dense node arrays.
    DenseNodes,
    /// Way records.
    Ways,
    /// Relation records.
    Relations,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Nodes => "nodes",
            Self::DenseNodes => "dense nodes",
            Self::Ways => "ways",
            Self::Relations => "relations",
        })
    }
}

/// A broken structural invariant inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    /// Two parallel arrays disagree in length.
    #[error("field {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the shorter or longer array.
        field: &'static str,
        /// Length implied by the reference array.
        expected: usize,
        /// Length actually present.
        actual: usize,
    },
    /// A string table index is negative or past the end of the table.
    #[error("string index {index} is outside a table of {len} entries")]
    StringIndexOutOfRange {
        /// Offending index.
        index: i64,
        /// Number of entries in the table.
        len: usize,
    },
    /// The dense tag array ended before a `0` delimiter.
    #[error("dense tag array ended at position {position} without a delimiter")]
    UnterminatedTags {
        /// Cursor position at which the array ran out.
        position: usize,
    },
    /// A relation member carried an unknown type enumerant.
    #[error("unknown member type {value}")]
    UnknownMemberKind {
        /// Raw enumerant.
        value: i32,
    },
    /// A running sum left the `i64` range.
    #[error("running sum of {field} overflowed")]
    DeltaOverflow {
        /// Name of the delta-coded field.
        field: &'static str,
    },
    /// A timestamp cannot be represented as a UTC instant.
    #[error("timestamp {raw} with granularity {granularity} ms is out of range")]
    TimestampOutOfRange {
        /// Raw timestamp from the block.
        raw: i64,
        /// Milliseconds per timestamp unit.
        granularity: i32,
    },
}

/// Errors returned while decoding a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The header requires a feature this decoder cannot honour.
    #[error("file requires unsupported feature: {feature}")]
    UnsupportedFeature {
        /// Name of the required feature.
        feature: String,
    },
    /// A structural invariant of the block is broken.
    #[error("structural violation in {section} at index {index}: {violation}")]
    Structural {
        /// Block section that failed.
        section: Section,
        /// Index of the offending record, or of the offending element within
        /// the dense arrays.
        index: usize,
        /// What went wrong.
        #[source]
        violation: Violation,
    },
}

/// How much of the input a [`DecodeError`] invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    /// The whole file is unreadable.
    File,
    /// Only the current block must be rejected.
    Block,
}

impl DecodeError {
    /// Report which part of the input the caller must reject.
    ///
    /// # Examples
    /// ```
    /// use osmblock_decoder::{DecodeError, FailureScope};
    ///
    /// let err = DecodeError::UnsupportedFeature {
    ///     feature: "HistoricalInformation".into(),
    /// };
    /// assert_eq!(err.scope(), FailureScope::File);
    /// ```
    #[must_use]
    pub const fn scope(&self) -> FailureScope {
        match self {
            Self::UnsupportedFeature { .. } => FailureScope::File,
            Self::Structural { .. } => FailureScope::Block,
        }
    }

    pub(crate) const fn structural(section: Section, index: usize, violation: Violation) -> Self {
        Self::Structural {
            section,
            index,
            violation,
        }
    }
}

/// Attach block context to a bare [`Violation`].
pub(crate) trait ViolationContext<T> {
    fn at(self, section: Section, index: usize) -> Result<T, DecodeError>;
}

impl<T> ViolationContext<T> for Result<T, Violation> {
    fn at(self, section: Section, index: usize) -> Result<T, DecodeError> {
        self.map_err(|violation| DecodeError::structural(section, index, violation))
    }
}
