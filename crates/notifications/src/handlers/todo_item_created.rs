//! Logs every created todo item.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{DomainEvent, EventKind};
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;
use crate::handler::{EventHandler, unexpected_event};
use crate::logger::EventLogger;

/// Writes one log record per `TodoItemCreated` event.
#[derive(Clone)]
pub struct TodoItemCreatedHandler {
    logger: Arc<dyn EventLogger>,
}

impl TodoItemCreatedHandler {
    /// Creates the handler around a logger.
    pub fn new(logger: Arc<dyn EventLogger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl EventHandler for TodoItemCreatedHandler {
    fn name(&self) -> &'static str {
        "TodoItemCreatedHandler"
    }

    fn subscribes_to(&self) -> EventKind {
        EventKind::TodoItemCreated
    }

    async fn handle(
        &self,
        event: &DomainEvent,
        cancel: &CancellationToken,
    ) -> Result<(), HandlerError> {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let DomainEvent::TodoItemCreated(_) = event else {
            return Err(unexpected_event(self, event));
        };

        self.logger.log_domain_event(event);
        Ok(())
    }
}
