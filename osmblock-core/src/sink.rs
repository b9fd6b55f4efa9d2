//! Receivers for decoded entities.
//!
//! A decoder calls [`EntitySink::process`] once per entity, in block order,
//! and finishes the stream with [`EntitySink::complete`] followed by
//! [`EntitySink::release`].

use crate::Entity;

/// Downstream receiver of decoded entities.
///
/// # Examples
/// ```
/// use osmblock_core::{Entity, EntitySink};
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl EntitySink for Counter {
///     fn process(&mut self, _entity: Entity) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = Counter::default();
/// counter.complete();
/// counter.release();
/// assert_eq!(counter.0, 0);
/// ```
pub trait EntitySink {
    /// Accept one decoded entity.
    fn process(&mut self, entity: Entity);

    /// Signal that no further entities follow, letting the sink flush.
    fn complete(&mut self) {}

    /// Free any resources held by the sink. Called after [`Self::complete`].
    fn release(&mut self) {}
}

impl<S: EntitySink + ?Sized> EntitySink for &mut S {
    fn process(&mut self, entity: Entity) {
        (**self).process(entity);
    }

    fn complete(&mut self) {
        (**self).complete();
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Sink that keeps every entity it receives, in arrival order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollectingSink {
    entities: Vec<Entity>,
    completed: bool,
    released: bool,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities received so far.
    #[must_use]
    pub const fn entities(&self) -> &[Entity] {
        self.entities.as_slice()
    }

    /// Consume the sink and return the received entities.
    #[must_use]
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    /// Whether [`EntitySink::complete`] has been called.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether [`EntitySink::release`] has been called.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }
}

impl EntitySink for CollectingSink {
    fn process(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    fn complete(&mut self) {
        self.completed = true;
    }

    fn release(&mut self) {
        self.released = true;
    }
}
