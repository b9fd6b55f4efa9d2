//! Core domain records for decoded OpenStreetMap blocks.
//!
//! The types here are what a block decoder hands to downstream consumers:
//! nodes, ways, relations, and the declared bounding region of a file,
//! together with their tags and optional editing metadata. The
//! [`EntitySink`] trait is the single seam through which decoded entities
//! leave the decoder.
//!
//! Coordinates are WGS84 degrees with `x = longitude` and `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod entity;
pub mod metadata;
pub mod sink;
pub mod tag;

pub use entity::{Bound, Entity, Member, MemberKind, Node, Relation, Way};
pub use metadata::{Author, Metadata, NO_CHANGESET, NO_VERSION};
pub use sink::{CollectingSink, EntitySink};
pub use tag::{Tag, Tags};
