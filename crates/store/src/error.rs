use common::{TodoItemId, TodoListId};
use thiserror::Error;

/// Errors that can occur when interacting with the todo store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A referenced todo list does not exist.
    #[error("Todo list not found: {0}")]
    ListNotFound(TodoListId),

    /// A referenced todo item does not exist.
    #[error("Todo item not found: {0}")]
    ItemNotFound(TodoItemId),

    /// The backend could not accept the commit.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
