//! Shared identifier types used across the todo workspace.

pub mod types;

pub use types::{EventId, TodoItemId, TodoListId};
