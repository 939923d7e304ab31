//! Default data for an empty store.

use common::TodoListId;
use domain::{TodoItem, TodoList};
use store::TodoStore;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::service::TodoService;

pub const DEFAULT_LIST_TITLE: &str = "Todo List";

/// Items of the default list, in creation order.
pub const DEFAULT_ITEM_TITLES: [&str; 4] = [
    "Make a todo list 📃",
    "Check off the first item ✅",
    "Realise you've already done two things on the list! 🤯",
    "Reward yourself with a nice, long nap 🏆",
];

/// Creates the default list and its items if the store holds no list yet.
///
/// Everything is committed in a single unit of work, so the created events
/// of the seeded items are dispatched like any other. Returns the new list's
/// ID, or `None` if there was already data.
#[tracing::instrument(skip_all)]
pub async fn seed_default_data<S: TodoStore>(
    service: &TodoService<S>,
    cancel: &CancellationToken,
) -> Result<Option<TodoListId>> {
    if !service.store().lists().await?.is_empty() {
        tracing::debug!("store already has data, skipping seed");
        return Ok(None);
    }

    let list = TodoList::create(DEFAULT_LIST_TITLE)?;
    let list_id = list.id();

    let mut uow = service.unit_of_work();
    uow.add_list(list);
    for title in DEFAULT_ITEM_TITLES {
        uow.add_item(TodoItem::create(list_id, title)?);
    }
    service.commit(uow, cancel).await?;

    tracing::info!(%list_id, items = DEFAULT_ITEM_TITLES.len(), "default data seeded");
    Ok(Some(list_id))
}
