//! Delivery of domain events to their handlers.
//!
//! This crate provides the notification side of the pipeline:
//! - [`EventHandler`] trait for side-effect executors subscribed to one [`EventKind`]
//! - [`HandlerRegistry`] mapping each kind to its ordered handlers, built once at startup
//! - [`EventDispatcher`] publishing committed events one at a time
//! - [`EventLogger`] sink and the two logging handlers for created and completed items
//!
//! [`EventKind`]: domain::EventKind

pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod logger;
pub mod registry;

pub use dispatcher::{DispatchReport, EventDispatcher, FailurePolicy, HandlerFailure};
pub use error::{DispatchError, HandlerError, Result};
pub use handler::EventHandler;
pub use handlers::{TodoItemCompletedHandler, TodoItemCreatedHandler};
pub use logger::{EventLogger, LoggedEvent, RecordingEventLogger, TracingEventLogger};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
