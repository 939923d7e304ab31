//! Handler and dispatch error types.

use common::EventId;
use domain::EventKind;
use thiserror::Error;

use crate::dispatcher::HandlerFailure;

/// Errors a handler can report for one event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler's side effect failed.
    #[error("Handler failed: {0}")]
    Failed(String),

    /// The handler was given an event of a kind it does not subscribe to.
    #[error("{handler} cannot handle {actual} (subscribed to {expected})")]
    UnexpectedEvent {
        handler: &'static str,
        expected: EventKind,
        actual: EventKind,
    },

    /// The handler panicked while processing the event.
    #[error("Handler panicked: {0}")]
    Panicked(String),
}

/// Errors that end a dispatch cycle early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A handler failed and the dispatcher runs with the abort policy.
    #[error("Handler {handler} failed on {kind} event {event_id}: {source}")]
    HandlerFailed {
        handler: &'static str,
        kind: EventKind,
        event_id: EventId,
        source: HandlerError,
    },

    /// The cancellation token fired before every event was delivered.
    ///
    /// `failures` holds the handler failures isolated before cancellation.
    #[error("Dispatch cancelled after {delivered} of {total} events")]
    Cancelled {
        delivered: usize,
        total: usize,
        failures: Vec<HandlerFailure>,
    },
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
