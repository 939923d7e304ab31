use async_trait::async_trait;
use common::{TodoItemId, TodoListId};
use domain::{TodoItem, TodoList};

use crate::Result;

/// A batch of changes applied to the store in a single commit.
///
/// Entities in a change set never carry pending domain events; the unit of
/// work drains them before handing the change set over.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Lists to insert or replace.
    pub upserted_lists: Vec<TodoList>,

    /// Lists to remove, together with all of their items.
    pub removed_lists: Vec<TodoListId>,

    /// Items to insert or replace.
    pub upserted_items: Vec<TodoItem>,

    /// Items to remove.
    pub removed_items: Vec<TodoItemId>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of changes.
    pub fn len(&self) -> usize {
        self.upserted_lists.len()
            + self.removed_lists.len()
            + self.upserted_items.len()
            + self.removed_items.len()
    }

    /// Returns true if the change set contains no changes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Core trait for todo store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Applies a change set atomically: either every change is applied or
    /// none is.
    ///
    /// Changes are applied in this order: list upserts, item upserts, item
    /// removals, list removals. Removing a list also removes its items.
    async fn commit(&self, changes: ChangeSet) -> Result<()>;

    /// Retrieves a list by ID.
    async fn list(&self, id: TodoListId) -> Result<Option<TodoList>>;

    /// Retrieves all lists ordered by title.
    async fn lists(&self) -> Result<Vec<TodoList>>;

    /// Retrieves an item by ID.
    async fn item(&self, id: TodoItemId) -> Result<Option<TodoItem>>;

    /// Retrieves the items of a list ordered by title.
    async fn items_for_list(&self, list_id: TodoListId) -> Result<Vec<TodoItem>>;
}
