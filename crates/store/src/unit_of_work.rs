//! Unit of work: the commit boundary that turns entity changes into a change
//! set and, on success, into the list of domain events to dispatch.

use common::TodoListId;
use domain::{DomainEvent, HasDomainEvents, TodoItem, TodoList};

use crate::Result;
use crate::store::{ChangeSet, TodoStore};

#[derive(Debug)]
enum ItemChange {
    Upsert(TodoItem),
    Remove(TodoItem),
}

/// Tracks the entities changed by one use case and commits them together.
///
/// The unit of work owns the tracked entities. [`UnitOfWork::commit`]
/// consumes it, so events collected from a failed commit are dropped with it
/// and can never be delivered.
pub struct UnitOfWork<'s, S: TodoStore + ?Sized> {
    store: &'s S,
    upserted_lists: Vec<TodoList>,
    removed_lists: Vec<TodoListId>,
    items: Vec<ItemChange>,
}

impl<'s, S: TodoStore + ?Sized> UnitOfWork<'s, S> {
    /// Starts a new unit of work against a store.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            upserted_lists: Vec::new(),
            removed_lists: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Tracks a newly created list.
    pub fn add_list(&mut self, list: TodoList) {
        self.upserted_lists.push(list);
    }

    /// Tracks a modified list.
    pub fn update_list(&mut self, list: TodoList) {
        self.upserted_lists.push(list);
    }

    /// Tracks a list for removal. Its items are removed by the store and
    /// raise no events.
    pub fn remove_list(&mut self, list: TodoList) {
        self.removed_lists.push(list.id());
    }

    /// Tracks a newly created item.
    pub fn add_item(&mut self, item: TodoItem) {
        self.items.push(ItemChange::Upsert(item));
    }

    /// Tracks a modified item.
    pub fn update_item(&mut self, item: TodoItem) {
        self.items.push(ItemChange::Upsert(item));
    }

    /// Tracks an item for removal, deleting it first so it raises
    /// `TodoItemDeleted`.
    pub fn remove_item(&mut self, mut item: TodoItem) {
        item.delete();
        self.items.push(ItemChange::Remove(item));
    }

    /// Returns the number of tracked changes.
    pub fn len(&self) -> usize {
        self.upserted_lists.len() + self.removed_lists.len() + self.items.len()
    }

    /// Returns true if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of events the tracked items have raised so far.
    pub fn pending_event_count(&self) -> usize {
        self.items
            .iter()
            .map(|change| match change {
                ItemChange::Upsert(item) | ItemChange::Remove(item) => item.domain_events().len(),
            })
            .sum()
    }

    /// Commits the tracked changes and returns the events raised by the
    /// tracked items.
    ///
    /// Events come back grouped by item in tracking order, each item's
    /// events in the order they were raised. If the store rejects the commit
    /// the error is returned and the events are discarded.
    #[tracing::instrument(skip(self), fields(changes = self.len()))]
    pub async fn commit(self) -> Result<Vec<DomainEvent>> {
        let store = self.store;
        let (changes, events) = self.collect();

        if changes.is_empty() {
            return Ok(events);
        }

        match store.commit(changes).await {
            Ok(()) => {
                metrics::counter!("unit_of_work_commits_total").increment(1);
                tracing::debug!(events = events.len(), "unit of work committed");
                Ok(events)
            }
            Err(err) => {
                metrics::counter!("unit_of_work_commit_failures_total").increment(1);
                tracing::warn!(
                    error = %err,
                    discarded_events = events.len(),
                    "unit of work commit failed, discarding domain events"
                );
                Err(err)
            }
        }
    }

    /// Drains every tracked item's event queue and builds the change set.
    fn collect(self) -> (ChangeSet, Vec<DomainEvent>) {
        let mut changes = ChangeSet {
            upserted_lists: self.upserted_lists,
            removed_lists: self.removed_lists,
            ..ChangeSet::new()
        };
        let mut events = Vec::new();

        for change in self.items {
            match change {
                ItemChange::Upsert(mut item) => {
                    events.extend(item.take_domain_events());
                    changes.upserted_items.push(item);
                }
                ItemChange::Remove(mut item) => {
                    events.extend(item.take_domain_events());
                    changes.removed_items.push(item.id());
                }
            }
        }

        (changes, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryTodoStore, StoreError};
    use domain::EventKind;

    async fn store_with_list() -> (InMemoryTodoStore, TodoList) {
        let store = InMemoryTodoStore::new();
        let list = TodoList::create("Chores").unwrap();
        let mut uow = UnitOfWork::new(&store);
        uow.add_list(list.clone());
        uow.commit().await.unwrap();
        (store, list)
    }

    fn kinds(events: &[DomainEvent]) -> Vec<EventKind> {
        events.iter().map(DomainEvent::kind).collect()
    }

    #[tokio::test]
    async fn empty_unit_of_work_commits_nothing() {
        let store = InMemoryTodoStore::new();
        let uow = UnitOfWork::new(&store);
        assert!(uow.is_empty());

        let events = uow.commit().await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn commit_returns_events_of_added_item() {
        let (store, list) = store_with_list().await;
        let item = TodoItem::create(list.id(), "Sweep").unwrap();
        let item_id = item.id();

        let mut uow = UnitOfWork::new(&store);
        uow.add_item(item);
        assert_eq!(uow.pending_event_count(), 1);

        let events = uow.commit().await.unwrap();
        assert_eq!(kinds(&events), vec![EventKind::TodoItemCreated]);
        assert_eq!(events[0].item_id(), item_id);
    }

    #[tokio::test]
    async fn stored_items_carry_no_pending_events() {
        let (store, list) = store_with_list().await;
        let item = TodoItem::create(list.id(), "Sweep").unwrap();
        let item_id = item.id();

        let mut uow = UnitOfWork::new(&store);
        uow.add_item(item);
        uow.commit().await.unwrap();

        let stored = store.item(item_id).await.unwrap().unwrap();
        assert!(stored.domain_events().is_empty());
    }

    #[tokio::test]
    async fn failed_commit_returns_no_events() {
        let store = InMemoryTodoStore::new();
        let orphan = TodoItem::create(TodoListId::new(), "Orphan").unwrap();
        let list_id = orphan.list_id();

        let mut uow = UnitOfWork::new(&store);
        uow.add_item(orphan);

        let result = uow.commit().await;
        assert_eq!(result, Err(StoreError::ListNotFound(list_id)));
    }

    #[tokio::test]
    async fn events_are_grouped_per_item_in_tracking_order() {
        let (store, list) = store_with_list().await;

        let mut first = TodoItem::create(list.id(), "First").unwrap();
        first.mark_complete();
        let second = TodoItem::create(list.id(), "Second").unwrap();
        let (first_id, second_id) = (first.id(), second.id());

        let mut uow = UnitOfWork::new(&store);
        uow.add_item(first);
        uow.add_item(second);
        let events = uow.commit().await.unwrap();

        let order: Vec<_> = events.iter().map(|e| (e.item_id(), e.kind())).collect();
        assert_eq!(
            order,
            vec![
                (first_id, EventKind::TodoItemCreated),
                (first_id, EventKind::TodoItemCompleted),
                (second_id, EventKind::TodoItemCreated),
            ]
        );
    }

    #[tokio::test]
    async fn remove_item_raises_deleted_and_removes_it() {
        let (store, list) = store_with_list().await;
        let item = TodoItem::create(list.id(), "Sweep").unwrap();
        let item_id = item.id();

        let mut uow = UnitOfWork::new(&store);
        uow.add_item(item);
        uow.commit().await.unwrap();

        let stored = store.item(item_id).await.unwrap().unwrap();
        let mut uow = UnitOfWork::new(&store);
        uow.remove_item(stored);
        let events = uow.commit().await.unwrap();

        assert_eq!(kinds(&events), vec![EventKind::TodoItemDeleted]);
        assert!(store.item(item_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_list_raises_no_events() {
        let (store, list) = store_with_list().await;
        let mut uow = UnitOfWork::new(&store);
        uow.add_item(TodoItem::create(list.id(), "Sweep").unwrap());
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::new(&store);
        uow.remove_list(list);
        let events = uow.commit().await.unwrap();

        assert!(events.is_empty());
        assert_eq!(store.item_count().await, 0);
    }
}
