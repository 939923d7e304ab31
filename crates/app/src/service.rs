//! Todo use cases.
//!
//! Every command loads what it needs, changes entities through their own
//! methods, commits one unit of work and dispatches the events the commit
//! returned. Queries read the store directly.

use std::sync::Arc;

use common::{TodoItemId, TodoListId};
use domain::{Colour, PriorityLevel, TodoItem, TodoList};
use notifications::EventDispatcher;
use store::{TodoStore, UnitOfWork};
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::queries::{PaginatedList, TodoListView};

/// Service for managing todo lists and items.
pub struct TodoService<S: TodoStore> {
    store: S,
    dispatcher: Arc<EventDispatcher>,
}

impl<S: TodoStore> TodoService<S> {
    /// Creates a new service over a store and a dispatcher.
    pub fn new(store: S, dispatcher: Arc<EventDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the dispatcher used after each commit.
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    // Lists

    /// Creates a list. Titles must be unique across lists.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn create_list(
        &self,
        title: &str,
        colour: Colour,
        cancel: &CancellationToken,
    ) -> Result<TodoListId> {
        let mut list = TodoList::create(title)?;
        list.set_colour(colour);
        self.ensure_unique_title(list.title(), None).await?;

        let id = list.id();
        let mut uow = self.unit_of_work();
        uow.add_list(list);
        self.commit(uow, cancel).await?;

        tracing::info!(list_id = %id, "todo list created");
        Ok(id)
    }

    /// Renames a list.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn update_list(
        &self,
        id: TodoListId,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut list = self.load_list(id).await?;
        list.rename(title)?;
        self.ensure_unique_title(list.title(), Some(id)).await?;

        let mut uow = self.unit_of_work();
        uow.update_list(list);
        self.commit(uow, cancel).await
    }

    /// Deletes a list together with its items.
    ///
    /// Items removed this way raise no `TodoItemDeleted` event.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete_list(&self, id: TodoListId, cancel: &CancellationToken) -> Result<()> {
        let list = self.load_list(id).await?;

        let mut uow = self.unit_of_work();
        uow.remove_list(list);
        self.commit(uow, cancel).await?;

        tracing::info!(list_id = %id, "todo list deleted");
        Ok(())
    }

    // Items

    /// Creates an open item on a list. Raises `TodoItemCreated`.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn create_item(
        &self,
        list_id: TodoListId,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<TodoItemId> {
        self.load_list(list_id).await?;
        let item = TodoItem::create(list_id, title)?;

        let id = item.id();
        let mut uow = self.unit_of_work();
        uow.add_item(item);
        self.commit(uow, cancel).await?;

        Ok(id)
    }

    /// Renames an item and sets its done flag.
    ///
    /// Raises `TodoItemCompleted` when `done` moves the item from open to done.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn update_item(
        &self,
        id: TodoItemId,
        title: &str,
        done: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut item = self.load_item(id).await?;
        item.rename(title)?;
        item.set_done(done);

        let mut uow = self.unit_of_work();
        uow.update_item(item);
        self.commit(uow, cancel).await
    }

    /// Moves an item to a list and sets its priority and note.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn update_item_details(
        &self,
        id: TodoItemId,
        list_id: TodoListId,
        priority: PriorityLevel,
        note: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut item = self.load_item(id).await?;
        self.load_list(list_id).await?;
        item.update_details(list_id, priority, note);

        let mut uow = self.unit_of_work();
        uow.update_item(item);
        self.commit(uow, cancel).await
    }

    /// Marks an item done. Raises `TodoItemCompleted` unless it already was.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn complete_item(&self, id: TodoItemId, cancel: &CancellationToken) -> Result<()> {
        let mut item = self.load_item(id).await?;
        if !item.mark_complete() {
            tracing::debug!(item_id = %id, "item already done");
            return Ok(());
        }

        let mut uow = self.unit_of_work();
        uow.update_item(item);
        self.commit(uow, cancel).await
    }

    /// Deletes an item. Raises `TodoItemDeleted`.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete_item(&self, id: TodoItemId, cancel: &CancellationToken) -> Result<()> {
        let item = self.load_item(id).await?;

        let mut uow = self.unit_of_work();
        uow.remove_item(item);
        self.commit(uow, cancel).await
    }

    // Queries

    /// Returns every list with its items, lists and items ordered by title.
    pub async fn lists(&self) -> Result<Vec<TodoListView>> {
        let mut views = Vec::new();
        for list in self.store.lists().await? {
            let items = self.store.items_for_list(list.id()).await?;
            views.push(TodoListView { list, items });
        }
        Ok(views)
    }

    /// Returns one page of a list's items ordered by title.
    pub async fn items_with_pagination(
        &self,
        list_id: TodoListId,
        page_number: usize,
        page_size: usize,
    ) -> Result<PaginatedList<TodoItem>> {
        if page_number == 0 || page_size == 0 {
            return Err(AppError::InvalidPagination {
                page_number,
                page_size,
            });
        }

        let items = self.store.items_for_list(list_id).await?;
        Ok(PaginatedList::from_source(items, page_number, page_size))
    }

    /// Returns every priority level, lowest first.
    pub fn priority_levels(&self) -> Vec<PriorityLevel> {
        PriorityLevel::ALL.to_vec()
    }

    /// Returns every supported list colour.
    pub fn colours(&self) -> Vec<Colour> {
        Colour::SUPPORTED.to_vec()
    }

    // Internals

    pub(crate) fn unit_of_work(&self) -> UnitOfWork<'_, S> {
        UnitOfWork::new(&self.store)
    }

    /// Commits `uow`, then dispatches the events it returned.
    ///
    /// Nothing is committed once `cancel` has fired. A dispatch error leaves
    /// the commit in place.
    pub(crate) async fn commit(
        &self,
        uow: UnitOfWork<'_, S>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            tracing::info!(
                changes = uow.len(),
                discarded_events = uow.pending_event_count(),
                "use case cancelled before commit"
            );
            return Err(AppError::Cancelled);
        }

        let events = uow.commit().await?;
        if events.is_empty() {
            return Ok(());
        }

        let report = self.dispatcher.dispatch(events, cancel).await?;
        tracing::debug!(
            events = report.events_dispatched,
            failures = report.failures.len(),
            "domain events dispatched"
        );
        Ok(())
    }

    async fn load_list(&self, id: TodoListId) -> Result<TodoList> {
        self.store
            .list(id)
            .await?
            .ok_or(AppError::ListNotFound(id))
    }

    async fn load_item(&self, id: TodoItemId) -> Result<TodoItem> {
        self.store
            .item(id)
            .await?
            .ok_or(AppError::ItemNotFound(id))
    }

    async fn ensure_unique_title(&self, title: &str, except: Option<TodoListId>) -> Result<()> {
        let taken = self
            .store
            .lists()
            .await?
            .iter()
            .any(|list| list.title() == title && Some(list.id()) != except);

        if taken {
            return Err(AppError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }
}
