//! The handler trait.

use async_trait::async_trait;
use domain::{DomainEvent, EventKind};
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;

/// A side-effect executor subscribed to exactly one event kind.
///
/// Handlers are stateless with respect to the event stream: every call is
/// independent. Dependencies are injected at construction.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns the name of this handler, used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Returns the event kind this handler subscribes to.
    fn subscribes_to(&self) -> EventKind;

    /// Handles one event.
    ///
    /// If `cancel` has already fired the handler should return `Ok(())`
    /// without doing any work.
    async fn handle(
        &self,
        event: &DomainEvent,
        cancel: &CancellationToken,
    ) -> Result<(), HandlerError>;
}

/// Builds the error a handler returns when given an event it does not
/// subscribe to.
pub fn unexpected_event<H: EventHandler + ?Sized>(
    handler: &H,
    event: &DomainEvent,
) -> HandlerError {
    HandlerError::UnexpectedEvent {
        handler: handler.name(),
        expected: handler.subscribes_to(),
        actual: event.kind(),
    }
}
