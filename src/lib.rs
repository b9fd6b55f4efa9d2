//! Facade crate for decoding OSM PBF blocks into domain entities.
//!
//! This crate re-exports the domain records from `osmblock-core` and the
//! block decoders from `osmblock-decoder`. The block encoder used in tests is
//! available behind the `test-support` feature.
//!
//! # Examples
//! ```
//! use osmblock::{
//!     Block, BlockDecoder, DenseNodes, PrimitiveBlock, PrimitiveGroup, SummarySink,
//! };
//!
//! let block = PrimitiveBlock {
//!     groups: vec![PrimitiveGroup {
//!         dense: Some(DenseNodes {
//!             id: vec![10, 1],
//!             lat: vec![5_000_000, 10],
//!             lon: vec![-1_000_000, -10],
//!             ..DenseNodes::default()
//!         }),
//!         ..PrimitiveGroup::default()
//!     }],
//!     ..PrimitiveBlock::default()
//! };
//! let mut decoder = BlockDecoder::new(SummarySink::default());
//! decoder.decode(&Block::Primitive(block))?;
//! decoder.complete();
//! assert_eq!(decoder.sink().nodes, 2);
//! assert!(decoder.sink().completed);
//! # Ok::<(), osmblock::DecodeError>(())
//! ```

#![forbid(unsafe_code)]

pub use osmblock_core::{
    Author, Bound, CollectingSink, Entity, EntitySink, Member, MemberKind, Metadata, NO_CHANGESET,
    NO_VERSION, Node, Relation, Tag, Tags, Way,
};

pub use osmblock_decoder::{
    Block, BlockDecoder, BlockScale, DEFAULT_DATE_GRANULARITY, DEFAULT_GRANULARITY,
    DEFAULT_ORIGIN, DecodeError, DecodeStats, DecoderOptions, DenseNodes, FailureScope,
    HeaderBBox, HeaderBlock, InfoRecord, NodeRecord, PrimitiveBlock, PrimitiveGroup,
    RelationRecord, SUPPORTED_FEATURES, Section, StringTable, SummarySink, Violation, WayRecord,
    block, decode_header_block, decode_primitive_block,
};

#[cfg(feature = "test-support")]
pub use osmblock_decoder::test_support;
