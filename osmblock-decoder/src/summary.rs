//! Sink that summarises a decoded stream.
use geo::{Coord, Rect};
use osmblock_core::{Entity, EntitySink};

/// Entity counts and extents gathered from decoded blocks.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use osmblock_core::{Entity, EntitySink, Metadata, Node};
/// use osmblock_decoder::SummarySink;
///
/// let mut summary = SummarySink::default();
/// summary.process(Entity::Node(Node {
///     id: 1,
///     location: Coord { x: 13.4, y: 52.5 },
///     tags: Vec::new(),
///     metadata: Metadata::none(),
/// }));
/// assert_eq!(summary.nodes, 1);
/// assert!(summary.node_extent.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummarySink {
    /// Number of nodes received.
    pub nodes: u64,
    /// Number of ways received.
    pub ways: u64,
    /// Number of relations received.
    pub relations: u64,
    /// Bounds declared by header blocks, merged.
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    pub declared_bounds: Option<Rect<f64>>,
    /// Rectangle covering every node with valid coordinates.
    pub node_extent: Option<Rect<f64>>,
    /// Whether the stream has been completed.
    pub completed: bool,
}

impl SummarySink {
    fn record_node(&mut self, lon: f64, lat: f64) {
        self.nodes += 1;
        if let Some(coordinate) = validated_coord(lon, lat) {
            self.node_extent = merge(self.node_extent, Some(Rect::new(coordinate, coordinate)));
        }
    }
}

impl EntitySink for SummarySink {
    fn process(&mut self, entity: Entity) {
        match entity {
            Entity::Bound(bound) => {
                self.declared_bounds = merge(self.declared_bounds, Some(bound.to_rect()));
            }
            Entity::Node(node) => self.record_node(node.lon(), node.lat()),
            Entity::Way(_) => self.ways += 1,
            Entity::Relation(_) => self.relations += 1,
        }
    }

    fn complete(&mut self) {
        self.completed = true;
    }
}

fn merge(lhs: Option<Rect<f64>>, rhs: Option<Rect<f64>>) -> Option<Rect<f64>> {
    match (lhs, rhs) {
        (Some(left), Some(right)) => Some(Rect::new(
            Coord {
                x: left.min().x.min(right.min().x),
                y: left.min().y.min(right.min().y),
            },
            Coord {
                x: left.max().x.max(right.max().x),
                y: left.max().y.max(right.max().y),
            },
        )),
        (Some(bounds), None) | (None, Some(bounds)) => Some(bounds),
        (None, None) => None,
    }
}

fn validated_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    (lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat))
    .then_some(Coord { x: lon, y: lat })
}
