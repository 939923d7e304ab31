//! Todo domain events.

use chrono::{DateTime, Utc};
use common::{EventId, TodoItemId, TodoListId};
use serde::{Deserialize, Serialize};

use crate::todo::TodoItem;

/// Events raised by todo entities.
///
/// The set is closed: handlers subscribe by [`EventKind`], so adding a
/// variant means adding a kind, and the compiler points at every match
/// that has to learn about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    /// A todo item was created.
    TodoItemCreated(TodoItemCreatedEvent),

    /// A todo item was marked as done.
    TodoItemCompleted(TodoItemCompletedEvent),

    /// A todo item was deleted.
    TodoItemDeleted(TodoItemDeletedEvent),
}

/// The kind of a [`DomainEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    TodoItemCreated,
    TodoItemCompleted,
    TodoItemDeleted,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [EventKind; 3] = [
        EventKind::TodoItemCreated,
        EventKind::TodoItemCompleted,
        EventKind::TodoItemDeleted,
    ];

    /// Returns the canonical kind name used in logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::TodoItemCreated => "TodoItemCreatedEvent",
            EventKind::TodoItemCompleted => "TodoItemCompletedEvent",
            EventKind::TodoItemDeleted => "TodoItemDeletedEvent",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Data for the TodoItemCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItemCreatedEvent {
    pub event_id: EventId,
    pub item_id: TodoItemId,
    pub list_id: TodoListId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

/// Data for the TodoItemCompleted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItemCompletedEvent {
    pub event_id: EventId,
    pub item_id: TodoItemId,
    pub list_id: TodoListId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

/// Data for the TodoItemDeleted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItemDeletedEvent {
    pub event_id: EventId,
    pub item_id: TodoItemId,
    pub list_id: TodoListId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Returns the kind tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::TodoItemCreated(_) => EventKind::TodoItemCreated,
            DomainEvent::TodoItemCompleted(_) => EventKind::TodoItemCompleted,
            DomainEvent::TodoItemDeleted(_) => EventKind::TodoItemDeleted,
        }
    }

    /// Returns the unique ID of this event occurrence.
    pub fn event_id(&self) -> EventId {
        match self {
            DomainEvent::TodoItemCreated(data) => data.event_id,
            DomainEvent::TodoItemCompleted(data) => data.event_id,
            DomainEvent::TodoItemDeleted(data) => data.event_id,
        }
    }

    /// Returns the ID of the item the event is about.
    pub fn item_id(&self) -> TodoItemId {
        match self {
            DomainEvent::TodoItemCreated(data) => data.item_id,
            DomainEvent::TodoItemCompleted(data) => data.item_id,
            DomainEvent::TodoItemDeleted(data) => data.item_id,
        }
    }

    /// Returns when the transition happened.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::TodoItemCreated(data) => data.occurred_at,
            DomainEvent::TodoItemCompleted(data) => data.occurred_at,
            DomainEvent::TodoItemDeleted(data) => data.occurred_at,
        }
    }
}

// Constructors are crate-private: only entity operations raise events.
impl DomainEvent {
    pub(crate) fn todo_item_created(item: &TodoItem) -> Self {
        DomainEvent::TodoItemCreated(TodoItemCreatedEvent {
            event_id: EventId::new(),
            item_id: item.id(),
            list_id: item.list_id(),
            title: item.title().to_string(),
            occurred_at: Utc::now(),
        })
    }

    pub(crate) fn todo_item_completed(item: &TodoItem) -> Self {
        DomainEvent::TodoItemCompleted(TodoItemCompletedEvent {
            event_id: EventId::new(),
            item_id: item.id(),
            list_id: item.list_id(),
            title: item.title().to_string(),
            occurred_at: Utc::now(),
        })
    }

    pub(crate) fn todo_item_deleted(item: &TodoItem) -> Self {
        DomainEvent::TodoItemDeleted(TodoItemDeletedEvent {
            event_id: EventId::new(),
            item_id: item.id(),
            list_id: item.list_id(),
            title: item.title().to_string(),
            occurred_at: Utc::now(),
        })
    }
}
