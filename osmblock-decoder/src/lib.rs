//! Semantic decoding of OSM PBF blocks into domain entities.
//!
//! Responsibilities:
//! - Check header features and convert declared bounds.
//! - Rebuild nodes, ways and relations from delta- and dictionary-coded
//!   arrays, resolving strings through the block's string table.
//! - Reject blocks whose structural invariants are broken.
//!
//! Boundaries:
//! - Container framing, compression and varint decoding happen upstream; this
//!   crate starts from the field-level records in [`block`].
//! - What happens to entities afterwards is up to the [`EntitySink`].
//!
//! Invariants:
//! - Entities leave in block order: per group, plain nodes, dense nodes,
//!   ways, relations.
//! - Dense node running sums span the whole run; way and relation member
//!   sums restart for every record.
//! - No state survives between blocks, so independent blocks may be decoded
//!   on separate threads.
//!
//! [`EntitySink`]: osmblock_core::EntitySink
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod block;
mod decoder;
mod delta;
mod dense;
mod error;
mod header;
mod metadata;
mod nodes;
mod relation;
mod scale;
mod strings;
mod summary;
mod tags;
mod way;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use block::{
    Block, DenseNodes, HeaderBBox, HeaderBlock, InfoRecord, NodeRecord, PrimitiveBlock,
    PrimitiveGroup, RelationRecord, WayRecord,
};
pub use decoder::{
    BlockDecoder, DEFAULT_ORIGIN, DecodeStats, DecoderOptions, decode_header_block,
    decode_primitive_block,
};
pub use error::{DecodeError, FailureScope, Section, Violation};
pub use header::SUPPORTED_FEATURES;
pub use scale::{BlockScale, DEFAULT_DATE_GRANULARITY, DEFAULT_GRANULARITY};
pub use strings::StringTable;
pub use summary::SummarySink;
