//! Handlers wired at startup.

pub mod todo_item_completed;
pub mod todo_item_created;

pub use todo_item_completed::TodoItemCompletedHandler;
pub use todo_item_created::TodoItemCreatedHandler;
