//! Logs every completed todo item.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{DomainEvent, EventKind};
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;
use crate::handler::{EventHandler, unexpected_event};
use crate::logger::EventLogger;

/// Writes one log record per `TodoItemCompleted` event.
#[derive(Clone)]
pub struct TodoItemCompletedHandler {
    logger: Arc<dyn EventLogger>,
}

impl TodoItemCompletedHandler {
    /// Creates the handler around a logger.
    pub fn new(logger: Arc<dyn EventLogger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl EventHandler for TodoItemCompletedHandler {
    fn name(&self) -> &'static str {
        "TodoItemCompletedHandler"
    }

    fn subscribes_to(&self) -> EventKind {
        EventKind::TodoItemCompleted
    }

    async fn handle(
        &self,
        event: &DomainEvent,
        cancel: &CancellationToken,
    ) -> Result<(), HandlerError> {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let DomainEvent::TodoItemCompleted(_) = event else {
            return Err(unexpected_event(self, event));
        };

        self.logger.log_domain_event(event);
        Ok(())
    }
}
