use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{TodoItemId, TodoListId};
use domain::{TodoItem, TodoList};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{ChangeSet, TodoStore},
};

#[derive(Debug, Clone, Default)]
struct State {
    lists: HashMap<TodoListId, TodoList>,
    items: HashMap<TodoItemId, TodoItem>,
}

impl State {
    fn apply(&mut self, changes: ChangeSet) -> Result<()> {
        for list in changes.upserted_lists {
            self.lists.insert(list.id(), list);
        }

        for item in changes.upserted_items {
            if !self.lists.contains_key(&item.list_id()) {
                return Err(StoreError::ListNotFound(item.list_id()));
            }
            self.items.insert(item.id(), item);
        }

        for item_id in changes.removed_items {
            if self.items.remove(&item_id).is_none() {
                return Err(StoreError::ItemNotFound(item_id));
            }
        }

        for list_id in changes.removed_lists {
            if self.lists.remove(&list_id).is_none() {
                return Err(StoreError::ListNotFound(list_id));
            }
            self.items.retain(|_, item| item.list_id() != list_id);
        }

        Ok(())
    }
}

/// In-memory todo store.
///
/// Commits are applied to a staged copy of the state which replaces the live
/// state only if every change succeeded.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryTodoStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored lists.
    pub async fn list_count(&self) -> usize {
        self.state.read().await.lists.len()
    }

    /// Returns the number of stored items.
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }

    /// Removes all lists and items.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.lists.clear();
        state.items.clear();
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        let mut state = self.state.write().await;

        let mut staged = state.clone();
        staged.apply(changes)?;
        *state = staged;

        Ok(())
    }

    async fn list(&self, id: TodoListId) -> Result<Option<TodoList>> {
        Ok(self.state.read().await.lists.get(&id).cloned())
    }

    async fn lists(&self) -> Result<Vec<TodoList>> {
        let state = self.state.read().await;
        let mut lists: Vec<_> = state.lists.values().cloned().collect();
        lists.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Ok(lists)
    }

    async fn item(&self, id: TodoItemId) -> Result<Option<TodoItem>> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn items_for_list(&self, list_id: TodoListId) -> Result<Vec<TodoItem>> {
        let state = self.state.read().await;
        let mut items: Vec<_> = state
            .items
            .values()
            .filter(|item| item.list_id() == list_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Ok(items)
    }
}
