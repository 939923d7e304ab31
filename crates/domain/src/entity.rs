//! Entity traits and the pending domain event queue.

use crate::event::DomainEvent;

/// An object with a stable identity.
pub trait Entity {
    /// The identifier type of this entity.
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Display;

    /// Returns the entity type name, used in logs and store errors.
    fn entity_type() -> &'static str;

    /// Returns the entity's unique identifier.
    fn id(&self) -> Self::Id;
}

/// An entity that records domain events while it mutates.
///
/// Events stay queued on the entity until the unit of work that persists it
/// drains them. Draining happens exactly once per commit.
pub trait HasDomainEvents: Entity {
    /// Returns the events raised since the last drain, oldest first.
    fn domain_events(&self) -> &[DomainEvent];

    /// Removes and returns all pending events, oldest first.
    fn take_domain_events(&mut self) -> Vec<DomainEvent>;
}

/// Ordered queue of events an entity has raised but not yet handed over.
///
/// Appending is crate-private so only entity operations can raise events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueue {
    pending: Vec<DomainEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn raise(&mut self, event: DomainEvent) {
        self.pending.push(event);
    }

    /// Returns the pending events, oldest first.
    pub fn pending(&self) -> &[DomainEvent] {
        &self.pending
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending)
    }
}
