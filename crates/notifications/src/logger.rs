//! Structured log sink injected into the logging handlers.

use std::sync::{Arc, Mutex};

use common::EventId;
use domain::{DomainEvent, EventKind};

/// Accepts one log record per handled domain event.
///
/// Implementations must not block the caller indefinitely.
pub trait EventLogger: Send + Sync {
    /// Records that a domain event was handled.
    fn log_domain_event(&self, event: &DomainEvent);
}

/// Writes domain event records through `tracing` at info level.
#[derive(Debug, Clone)]
pub struct TracingEventLogger {
    app_name: String,
}

impl TracingEventLogger {
    /// Creates a logger that prefixes messages with the application name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Returns the application name used as message prefix.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl EventLogger for TracingEventLogger {
    fn log_domain_event(&self, event: &DomainEvent) {
        let kind = event.kind().name();
        tracing::info!(
            domain_event = kind,
            event_id = %event.event_id(),
            item_id = %event.item_id(),
            "{} Domain Event: {}",
            self.app_name,
            kind
        );
    }
}

/// A record kept by [`RecordingEventLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    pub kind: EventKind,
    pub kind_name: &'static str,
    pub event_id: EventId,
}

/// Keeps every record in memory instead of writing it out.
///
/// Clones share the same records, so a clone handed to the handlers can be
/// inspected by whoever kept the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventLogger {
    records: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl RecordingEventLogger {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record, oldest first.
    pub fn records(&self) -> Vec<LoggedEvent> {
        self.lock().clone()
    }

    /// Returns the kind names of every record, oldest first.
    pub fn kind_names(&self) -> Vec<&'static str> {
        self.lock().iter().map(|r| r.kind_name).collect()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LoggedEvent>> {
        // A poisoned lock still holds valid records.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventLogger for RecordingEventLogger {
    fn log_domain_event(&self, event: &DomainEvent) {
        self.lock().push(LoggedEvent {
            kind: event.kind(),
            kind_name: event.kind().name(),
            event_id: event.event_id(),
        });
    }
}
