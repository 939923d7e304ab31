//! Todo list entity.

use chrono::{DateTime, Utc};
use common::TodoListId;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::TodoError;

use super::{Colour, validate_title};

/// A named, coloured collection of todo items.
///
/// Lists raise no domain events; items reference their list by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    id: TodoListId,
    title: String,
    colour: Colour,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl Entity for TodoList {
    type Id = TodoListId;

    fn entity_type() -> &'static str {
        "TodoList"
    }

    fn id(&self) -> TodoListId {
        self.id
    }
}

impl TodoList {
    /// Creates a new list with the default colour.
    pub fn create(title: impl Into<String>) -> Result<Self, TodoError> {
        let title = validate_title(title)?;
        let now = Utc::now();

        Ok(Self {
            id: TodoListId::new(),
            title,
            colour: Colour::default(),
            created_at: now,
            last_modified: now,
        })
    }

    /// Returns the list ID.
    pub fn id(&self) -> TodoListId {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the colour.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Returns when the list was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the list was last changed.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Changes the title.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), TodoError> {
        self.title = validate_title(title)?;
        self.last_modified = Utc::now();
        Ok(())
    }

    /// Changes the colour.
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
        self.last_modified = Utc::now();
    }
}
