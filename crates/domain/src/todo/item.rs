//! Todo item entity.

use chrono::{DateTime, Utc};
use common::{TodoItemId, TodoListId};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EventQueue, HasDomainEvents};
use crate::error::TodoError;
use crate::event::DomainEvent;

use super::{PriorityLevel, validate_title};

/// A single entry on a todo list.
///
/// State-changing operations that other parts of the system care about
/// (creation, completion, deletion) raise a [`DomainEvent`] into the item's
/// own queue before returning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    id: TodoItemId,
    list_id: TodoListId,
    title: String,
    note: Option<String>,
    priority: PriorityLevel,
    reminder: Option<DateTime<Utc>>,
    done: bool,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,

    /// Set once [`TodoItem::delete`] has run.
    #[serde(skip)]
    deleted: bool,

    /// Events are transient and never serialized with the item.
    #[serde(skip)]
    events: EventQueue,
}

impl Entity for TodoItem {
    type Id = TodoItemId;

    fn entity_type() -> &'static str {
        "TodoItem"
    }

    fn id(&self) -> TodoItemId {
        self.id
    }
}

impl HasDomainEvents for TodoItem {
    fn domain_events(&self) -> &[DomainEvent] {
        self.events.pending()
    }

    fn take_domain_events(&mut self) -> Vec<DomainEvent> {
        self.events.drain()
    }
}

// Query methods
impl TodoItem {
    /// Returns the item ID.
    pub fn id(&self) -> TodoItemId {
        self.id
    }

    /// Returns the ID of the list the item belongs to.
    pub fn list_id(&self) -> TodoListId {
        self.list_id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form note, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the priority.
    pub fn priority(&self) -> PriorityLevel {
        self.priority
    }

    /// Returns the reminder time, if any.
    pub fn reminder(&self) -> Option<DateTime<Utc>> {
        self.reminder
    }

    /// Returns true if the item is done.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns true if the item has been deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns when the item was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the item was last changed.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}

// Command methods
impl TodoItem {
    /// Creates a new open item on a list. Raises `TodoItemCreated`.
    pub fn create(list_id: TodoListId, title: impl Into<String>) -> Result<Self, TodoError> {
        let title = validate_title(title)?;
        let now = Utc::now();

        let mut item = Self {
            id: TodoItemId::new(),
            list_id,
            title,
            note: None,
            priority: PriorityLevel::default(),
            reminder: None,
            done: false,
            created_at: now,
            last_modified: now,
            deleted: false,
            events: EventQueue::new(),
        };

        let event = DomainEvent::todo_item_created(&item);
        item.events.raise(event);

        Ok(item)
    }

    /// Changes the title.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), TodoError> {
        self.title = validate_title(title)?;
        self.touch();
        Ok(())
    }

    /// Moves the item to a list and updates its priority and note.
    ///
    /// A blank note clears it.
    pub fn update_details(
        &mut self,
        list_id: TodoListId,
        priority: PriorityLevel,
        note: Option<String>,
    ) {
        self.list_id = list_id;
        self.priority = priority;
        self.note = note.filter(|n| !n.trim().is_empty());
        self.touch();
    }

    /// Sets or clears the reminder.
    pub fn set_reminder(&mut self, reminder: Option<DateTime<Utc>>) {
        self.reminder = reminder;
        self.touch();
    }

    /// Marks the item done.
    ///
    /// Raises `TodoItemCompleted` only on the open → done transition and
    /// returns whether that transition happened.
    pub fn mark_complete(&mut self) -> bool {
        if self.done {
            return false;
        }

        self.done = true;
        self.touch();

        let event = DomainEvent::todo_item_completed(self);
        self.events.raise(event);
        true
    }

    /// Reopens a done item. Raises nothing.
    pub fn mark_incomplete(&mut self) {
        if self.done {
            self.done = false;
            self.touch();
        }
    }

    /// Sets the done flag, raising `TodoItemCompleted` when it flips to true.
    ///
    /// Returns true if the item was completed by this call.
    pub fn set_done(&mut self, done: bool) -> bool {
        if done {
            self.mark_complete()
        } else {
            self.mark_incomplete();
            false
        }
    }

    /// Marks the item deleted. Raises `TodoItemDeleted` the first time only.
    pub fn delete(&mut self) -> bool {
        if self.deleted {
            return false;
        }

        self.deleted = true;

        let event = DomainEvent::todo_item_deleted(self);
        self.events.raise(event);
        true
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}
