//! Application error types.

use common::{TodoItemId, TodoListId};
use domain::TodoError;
use notifications::DispatchError;
use store::StoreError;
use thiserror::Error;

/// Errors returned by the todo use cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// An entity rejected the change.
    #[error(transparent)]
    Todo(#[from] TodoError),

    /// The store failed; nothing was committed and no event was delivered.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The change was committed but delivering its events failed.
    #[error("Change committed but event dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The cancellation token fired before the change was committed.
    #[error("Operation cancelled before commit")]
    Cancelled,

    #[error("Todo list not found: {0}")]
    ListNotFound(TodoListId),

    #[error("Todo item not found: {0}")]
    ItemNotFound(TodoItemId),

    /// Another list already uses this title.
    #[error("A todo list titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Invalid pagination: page {page_number} of size {page_size} (both must be at least 1)")]
    InvalidPagination { page_number: usize, page_size: usize },
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
