//! Block-level decoding and delivery to a sink.
//!
//! A block is decoded in full before any of its entities reach the sink, so
//! a rejected block never leaves a partial entity set downstream.

use log::{debug, warn};
use osmblock_core::{Entity, EntitySink};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::block::{Block, HeaderBlock, PrimitiveBlock};
use crate::dense::decode_dense;
use crate::error::{DecodeError, FailureScope};
use crate::header::decode_header;
use crate::nodes::decode_nodes;
use crate::relation::decode_relations;
use crate::scale::BlockScale;
use crate::way::decode_ways;

/// Provenance recorded on bounds when no other origin is configured.
pub const DEFAULT_ORIGIN: &str = "http://www.openstreetmap.org/api/0.6";

/// Settings applied to every block a [`BlockDecoder`] handles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderOptions {
    /// Provenance string attached to decoded bounds.
    pub origin: String,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_owned(),
        }
    }
}

/// Counters kept by a [`BlockDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Blocks decoded and delivered.
    pub blocks: u64,
    /// Blocks rejected with an error.
    pub rejected: u64,
    /// Entities handed to the sink.
    pub entities: u64,
}

/// Decode a header block into its bound.
///
/// # Errors
/// Returns [`DecodeError::UnsupportedFeature`] when the header requires a
/// feature other than `DenseNodes`.
pub fn decode_header_block(
    header: &HeaderBlock,
    options: &DecoderOptions,
) -> Result<Entity, DecodeError> {
    decode_header(header, &options.origin).map(Entity::Bound)
}

/// Decode a data block into entities in emission order.
///
/// Each group contributes its plain nodes, then its dense nodes, then its
/// ways, then its relations.
///
/// # Errors
/// Returns [`DecodeError::Structural`] on the first broken invariant.
///
/// # Examples
/// ```
/// use osmblock_decoder::{
///     PrimitiveBlock, PrimitiveGroup, StringTable, WayRecord, decode_primitive_block,
/// };
///
/// let block = PrimitiveBlock {
///     string_table: StringTable::new(vec![String::new()]),
///     groups: vec![PrimitiveGroup {
///         ways: vec![WayRecord { id: 7, refs: vec![3, 1, 1], ..WayRecord::default() }],
///         ..PrimitiveGroup::default()
///     }],
///     ..PrimitiveBlock::default()
/// };
/// let entities = decode_primitive_block(&block)?;
/// assert_eq!(entities.len(), 1);
/// # Ok::<(), osmblock_decoder::DecodeError>(())
/// ```
pub fn decode_primitive_block(block: &PrimitiveBlock) -> Result<Vec<Entity>, DecodeError> {
    let strings = &block.string_table;
    let scale = BlockScale::from_block(block);
    let mut entities = Vec::new();
    for group in &block.groups {
        decode_nodes(&group.nodes, strings, &scale, &mut entities)?;
        if let Some(dense) = &group.dense {
            decode_dense(dense, strings, &scale, &mut entities)?;
        }
        decode_ways(&group.ways, strings, &scale, &mut entities)?;
        decode_relations(&group.relations, strings, &scale, &mut entities)?;
    }
    Ok(entities)
}

/// Decodes blocks and forwards their entities to a sink.
///
/// # Examples
/// ```
/// use osmblock_core::{CollectingSink, Entity};
/// use osmblock_decoder::{Block, BlockDecoder, HeaderBBox, HeaderBlock};
///
/// let mut decoder = BlockDecoder::new(CollectingSink::new());
/// let header = HeaderBlock {
///     bbox: HeaderBBox { left: 0, right: 1_000_000_000, top: 500_000_000, bottom: -500_000_000 },
///     ..HeaderBlock::default()
/// };
/// decoder.decode(&Block::Header(header))?;
/// decoder.complete();
///
/// let sink = decoder.into_sink();
/// assert!(sink.is_released());
/// assert!(matches!(sink.entities(), [Entity::Bound(bound)] if bound.right == 1.0));
/// # Ok::<(), osmblock_decoder::DecodeError>(())
/// ```
#[derive(Debug)]
pub struct BlockDecoder<S> {
    sink: S,
    options: DecoderOptions,
    stats: DecodeStats,
    fatal: Option<DecodeError>,
}

impl<S: EntitySink> BlockDecoder<S> {
    /// Create a decoder with default options.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, DecoderOptions::default())
    }

    /// Create a decoder with explicit options.
    #[must_use]
    pub fn with_options(sink: S, options: DecoderOptions) -> Self {
        Self {
            sink,
            options,
            stats: DecodeStats::default(),
            fatal: None,
        }
    }

    /// Decode one block and deliver its entities in order.
    ///
    /// Nothing reaches the sink when the block is rejected. After a
    /// file-scoped error every later block is refused with that same error;
    /// whether to skip a block-scoped rejection is the caller's decision.
    ///
    /// # Errors
    /// Propagates any [`DecodeError`] raised while decoding the block, or
    /// repeats the earlier file-scoped error.
    pub fn decode(&mut self, block: &Block) -> Result<(), DecodeError> {
        if let Some(fatal) = &self.fatal {
            self.stats.rejected += 1;
            warn!("Refused {} block after fatal error: {fatal}", block.type_name());
            return Err(fatal.clone());
        }
        let decoded = match block {
            Block::Header(header) => {
                decode_header_block(header, &self.options).map(|bound| vec![bound])
            }
            Block::Primitive(primitive) => decode_primitive_block(primitive),
        };
        match decoded {
            Ok(entities) => {
                debug!(
                    "Decoded {} block with {} entities",
                    block.type_name(),
                    entities.len()
                );
                self.deliver(entities);
                Ok(())
            }
            Err(err) => {
                self.stats.rejected += 1;
                warn!("Rejected {} block: {err}", block.type_name());
                if err.scope() == FailureScope::File {
                    self.fatal = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    /// Signal end of stream: completes, then releases, the sink.
    pub fn complete(&mut self) {
        debug!(
            "Completing after {} blocks ({} rejected), {} entities",
            self.stats.blocks, self.stats.rejected, self.stats.entities
        );
        self.sink.complete();
        self.sink.release();
    }

    /// Whether a file-scoped error has stopped this decoder.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.fatal.is_some()
    }

    /// Counters for the blocks handled so far.
    #[must_use]
    pub const fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Options in use.
    #[must_use]
    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Borrow the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the decoder and return the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn deliver(&mut self, entities: Vec<Entity>) {
        self.stats.blocks += 1;
        for entity in entities {
            self.stats.entities += 1;
            self.sink.process(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{
        DenseNodes, HeaderBBox, NodeRecord, PrimitiveGroup, RelationRecord, WayRecord,
    };
    use osmblock_core::CollectingSink;
    use rstest::{fixture, rstest};

    #[fixture]
    fn mixed_block() -> PrimitiveBlock {
        PrimitiveBlock {
            string_table: ["", "name", "A"].into_iter().collect(),
            groups: vec![
                PrimitiveGroup {
                    nodes: vec![NodeRecord {
                        id: 1,
                        ..NodeRecord::default()
                    }],
                    dense: Some(DenseNodes {
                        id: vec![2, 1],
                        lat: vec![0, 0],
                        lon: vec![0, 0],
                        keys_vals: vec![1, 2, 0, 0],
                        info: Vec::new(),
                    }),
                    ways: vec![WayRecord {
                        id: 10,
                        refs: vec![1, 1],
                        ..WayRecord::default()
                    }],
                    relations: vec![RelationRecord {
                        id: 20,
                        memids: vec![10],
                        roles_sid: vec![0],
                        types: vec![1],
                        ..RelationRecord::default()
                    }],
                },
                PrimitiveGroup {
                    ways: vec![WayRecord {
                        id: 11,
                        ..WayRecord::default()
                    }],
                    ..PrimitiveGroup::default()
                },
            ],
            ..PrimitiveBlock::default()
        }
    }

    fn kinds_and_ids(entities: &[Entity]) -> Vec<(&'static str, Option<i64>)> {
        entities
            .iter()
            .map(|entity| (entity.kind_name(), entity.id()))
            .collect()
    }

    #[rstest]
    fn emits_groups_in_node_way_relation_order(mixed_block: PrimitiveBlock) {
        let entities = decode_primitive_block(&mixed_block).expect("decodes");
        assert_eq!(
            kinds_and_ids(&entities),
            vec![
                ("node", Some(1)),
                ("node", Some(2)),
                ("node", Some(3)),
                ("way", Some(10)),
                ("relation", Some(20)),
                ("way", Some(11)),
            ]
        );
    }

    #[rstest]
    fn rejected_block_reaches_no_sink(mut mixed_block: PrimitiveBlock) {
        if let Some(relation) = mixed_block
            .groups
            .first_mut()
            .and_then(|group| group.relations.first_mut())
        {
            relation.types = vec![9];
        }
        let mut decoder = BlockDecoder::new(CollectingSink::new());
        let err = decoder
            .decode(&Block::Primitive(mixed_block))
            .expect_err("unknown member kind");
        assert!(matches!(err, DecodeError::Structural { .. }));
        assert!(decoder.sink().entities().is_empty());
        assert_eq!(
            decoder.stats(),
            DecodeStats {
                blocks: 0,
                rejected: 1,
                entities: 0,
            }
        );
    }

    #[rstest]
    fn unsupported_header_emits_nothing() {
        let header = HeaderBlock {
            required_features: vec!["HistoricalInformation".into()],
            ..HeaderBlock::default()
        };
        let mut decoder = BlockDecoder::new(CollectingSink::new());
        let err = decoder
            .decode(&Block::Header(header))
            .expect_err("feature unsupported");
        assert_eq!(err.scope(), FailureScope::File);
        assert!(decoder.sink().entities().is_empty());
    }

    #[rstest]
    fn blocks_after_unsupported_header_are_refused(mixed_block: PrimitiveBlock) {
        let header = HeaderBlock {
            required_features: vec!["HistoricalInformation".into()],
            ..HeaderBlock::default()
        };
        let mut decoder = BlockDecoder::new(CollectingSink::new());
        let first = decoder
            .decode(&Block::Header(header))
            .expect_err("feature unsupported");
        assert!(decoder.is_aborted());
        let second = decoder
            .decode(&Block::Primitive(mixed_block))
            .expect_err("decoder stopped");
        assert_eq!(second, first);
        assert!(decoder.sink().entities().is_empty());
        assert_eq!(
            decoder.stats(),
            DecodeStats {
                blocks: 0,
                rejected: 2,
                entities: 0,
            }
        );
    }

    #[rstest]
    fn structural_rejection_does_not_stop_the_decoder(mixed_block: PrimitiveBlock) {
        let mut broken = mixed_block.clone();
        if let Some(group) = broken.groups.first_mut() {
            group.ways = vec![WayRecord {
                id: 10,
                keys: vec![1],
                ..WayRecord::default()
            }];
        }
        let mut decoder = BlockDecoder::new(CollectingSink::new());
        assert!(decoder.decode(&Block::Primitive(broken)).is_err());
        assert!(!decoder.is_aborted());
        decoder
            .decode(&Block::Primitive(mixed_block))
            .expect("later block decodes");
        assert_eq!(decoder.sink().entities().len(), 6);
    }

    #[rstest]
    fn custom_origin_is_recorded_on_bounds() {
        let options = DecoderOptions {
            origin: "survey".into(),
        };
        let header = HeaderBlock {
            bbox: HeaderBBox {
                left: -1_000_000_000,
                right: 1_000_000_000,
                top: 1_000_000_000,
                bottom: -1_000_000_000,
            },
            ..HeaderBlock::default()
        };
        let entity = decode_header_block(&header, &options).expect("decodes");
        match entity {
            Entity::Bound(bound) => {
                assert_eq!(bound.origin, "survey");
                assert_eq!(bound.left, -1.0);
            }
            other => panic!("expected bound, got {other:?}"),
        }
    }

    #[rstest]
    fn complete_finishes_and_releases_sink(mixed_block: PrimitiveBlock) {
        let mut decoder = BlockDecoder::new(CollectingSink::new());
        decoder
            .decode(&Block::Primitive(mixed_block))
            .expect("decodes");
        decoder.complete();
        assert_eq!(decoder.stats().entities, 6);
        let sink = decoder.into_sink();
        assert!(sink.is_completed());
        assert!(sink.is_released());
        assert_eq!(sink.entities().len(), 6);
    }

    #[rstest]
    fn default_origin_is_the_api_endpoint() {
        assert_eq!(DecoderOptions::default().origin, DEFAULT_ORIGIN);
    }
}
