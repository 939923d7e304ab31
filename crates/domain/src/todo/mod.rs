//! Todo lists, todo items and their value objects.

mod item;
mod list;
mod value_objects;

pub use item::TodoItem;
pub use list::TodoList;
pub use value_objects::{Colour, PriorityLevel};

use crate::error::TodoError;

/// Maximum number of characters in a list or item title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Trims a title and checks it against the title rules.
pub(crate) fn validate_title(title: impl Into<String>) -> Result<String, TodoError> {
    let title = title.into().trim().to_string();

    if title.is_empty() {
        return Err(TodoError::TitleRequired);
    }

    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TodoError::TitleTooLong {
            length,
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(title)
}
