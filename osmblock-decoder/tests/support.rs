//! Shared helpers for the decoder integration tests.

use chrono::DateTime;
use geo::Coord;
use osmblock_core::{Author, Entity, Member, MemberKind, Metadata, Node, Relation, Tag, Way};

/// Epsilon for floating-point coordinate comparisons in tests
const COORDINATE_EPSILON: f64 = 1.0e-7;

/// Compare floating-point coordinates within a small epsilon.
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= COORDINATE_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}

/// Metadata with every field recorded.
pub fn edited_by(uid: i32, name: &str, version: i32) -> Metadata {
    Metadata {
        version,
        timestamp: DateTime::from_timestamp(1_700_000_000, 0),
        changeset: 4_200 + i64::from(version),
        author: Some(Author::new(uid, name)),
    }
}

/// A small neighbourhood: three nodes, a way revisiting one of them, and a
/// route relation over the way and a node.
pub fn sample_entities() -> (Vec<Node>, Vec<Way>, Vec<Relation>) {
    let nodes = vec![
        Node {
            id: 1_000,
            location: Coord {
                x: 11.625_644_7,
                y: 52.119_899_1,
            },
            tags: vec![Tag::new("amenity", "cafe"), Tag::new("name", "Kaffeehaus")],
            metadata: edited_by(7, "alice", 3),
        },
        Node {
            id: 1_002,
            location: Coord {
                x: 11.631_019_3,
                y: 52.122_403_2,
            },
            tags: Vec::new(),
            metadata: Metadata::none(),
        },
        Node {
            id: 998,
            location: Coord {
                x: -0.127_758_3,
                y: -33.868_820_1,
            },
            tags: vec![Tag::new("historic", "memorial")],
            metadata: edited_by(8, "bob", 1),
        },
    ];
    let ways = vec![Way {
        id: 50,
        refs: vec![1_000, 1_002, 998, 1_000],
        tags: vec![Tag::new("highway", "footway")],
        metadata: edited_by(7, "alice", 2),
    }];
    let relations = vec![Relation {
        id: 9,
        members: vec![
            Member::new(50, MemberKind::Way, "forward"),
            Member::new(998, MemberKind::Node, "stop"),
            Member::new(3, MemberKind::Relation, ""),
        ],
        tags: vec![Tag::new("type", "route"), Tag::new("route", "foot")],
        metadata: Metadata::none(),
    }];
    (nodes, ways, relations)
}

/// Assert that decoded entities match the originals, comparing coordinates
/// within [`COORDINATE_EPSILON`] and everything else exactly.
pub fn assert_entities_match(actual: &[Entity], expected: &[Entity]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "entity count differs: {actual:?} vs {expected:?}"
    );
    for (decoded, original) in actual.iter().zip(expected) {
        match (decoded, original) {
            (Entity::Node(node), Entity::Node(expected_node)) => {
                assert_eq!(node.id, expected_node.id);
                assert_eq!(node.tags, expected_node.tags);
                assert_eq!(node.metadata, expected_node.metadata);
                assert_close(node.lat(), expected_node.lat());
                assert_close(node.lon(), expected_node.lon());
            }
            (other, expected_other) => assert_eq!(other, expected_other),
        }
    }
}
