//! Domain layer for the todo event pipeline.
//!
//! This crate provides:
//! - [`DomainEvent`], the closed set of events raised by entities, and its
//!   [`EventKind`] tag
//! - [`EventQueue`] and the [`HasDomainEvents`] trait through which entities
//!   expose their pending events
//! - The [`TodoList`] and [`TodoItem`] entities with their value objects

pub mod entity;
pub mod error;
pub mod event;
pub mod todo;

pub use entity::{Entity, EventQueue, HasDomainEvents};
pub use error::TodoError;
pub use event::{
    DomainEvent, EventKind, TodoItemCompletedEvent, TodoItemCreatedEvent, TodoItemDeletedEvent,
};
pub use todo::{Colour, PriorityLevel, TodoItem, TodoList, MAX_TITLE_LENGTH};
