//! Post-commit delivery of domain events to their handlers.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use common::EventId;
use domain::{DomainEvent, EventKind};
use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::error::{DispatchError, HandlerError};
use crate::handler::EventHandler;
use crate::registry::HandlerRegistry;
use crate::Result;

/// What the dispatcher does when a handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, record it in the report and keep delivering.
    #[default]
    Continue,

    /// Stop at the first failure and return it to the caller.
    Abort,
}

impl FailurePolicy {
    /// Returns the configuration name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Continue => "continue",
            FailurePolicy::Abort => "abort",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

/// A handler failure that was isolated under [`FailurePolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub handler: &'static str,
    pub kind: EventKind,
    pub event_id: EventId,
    pub error: HandlerError,
}

/// Summary of one dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of events whose handlers all ran (or were attempted).
    pub events_dispatched: usize,

    /// Number of handler invocations, failed ones included.
    pub handler_invocations: usize,

    /// Failures isolated during the cycle.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    /// Returns true if no handler failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delivers committed domain events to the handlers registered for them.
///
/// Delivery is sequential: each handler of an event is awaited before the
/// next one starts, and every handler of an event finishes before the next
/// event is published.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    registry: HandlerRegistry,
    policy: FailurePolicy,
}

impl EventDispatcher {
    /// Creates a dispatcher that isolates handler failures.
    pub fn new(registry: HandlerRegistry) -> Self {
        Self::with_policy(registry, FailurePolicy::default())
    }

    /// Creates a dispatcher with an explicit failure policy.
    pub fn with_policy(registry: HandlerRegistry, policy: FailurePolicy) -> Self {
        Self { registry, policy }
    }

    /// Returns the handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Returns the failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Publishes every event, in order, to its handlers.
    ///
    /// Takes the events by value: once dispatched they are gone. Checks
    /// `cancel` before each event and stops with
    /// [`DispatchError::Cancelled`] once it has fired, handing back the
    /// failures isolated up to that point.
    #[tracing::instrument(skip(self, events, cancel), fields(events = events.len(), policy = %self.policy))]
    pub async fn dispatch(
        &self,
        events: Vec<DomainEvent>,
        cancel: &CancellationToken,
    ) -> Result<DispatchReport> {
        let total = events.len();
        let mut report = DispatchReport::default();

        for event in events {
            if cancel.is_cancelled() {
                tracing::warn!(
                    delivered = report.events_dispatched,
                    remaining = total - report.events_dispatched,
                    "dispatch cancelled"
                );
                return Err(DispatchError::Cancelled {
                    delivered: report.events_dispatched,
                    total,
                    failures: report.failures,
                });
            }

            self.publish(&event, cancel, &mut report).await?;
            report.events_dispatched += 1;
        }

        if !report.is_clean() {
            tracing::warn!(
                failures = report.failures.len(),
                events = report.events_dispatched,
                "dispatch finished with handler failures"
            );
        }

        Ok(report)
    }

    /// Runs every handler of one event.
    async fn publish(
        &self,
        event: &DomainEvent,
        cancel: &CancellationToken,
        report: &mut DispatchReport,
    ) -> Result<()> {
        let kind = event.kind();
        let handlers = self.registry.resolve(kind);
        if handlers.is_empty() {
            return Ok(());
        }

        metrics::counter!("domain_events_dispatched_total", "kind" => kind.name()).increment(1);

        for handler in handlers {
            report.handler_invocations += 1;
            metrics::counter!(
                "domain_event_handler_invocations_total",
                "handler" => handler.name()
            )
            .increment(1);

            let Err(error) = invoke(handler.as_ref(), event, cancel).await else {
                continue;
            };

            metrics::counter!(
                "domain_event_handler_failures_total",
                "handler" => handler.name()
            )
            .increment(1);

            match self.policy {
                FailurePolicy::Continue => {
                    tracing::error!(
                        handler = handler.name(),
                        domain_event = kind.name(),
                        event_id = %event.event_id(),
                        error = %error,
                        "domain event handler failed, continuing"
                    );
                    report.failures.push(HandlerFailure {
                        handler: handler.name(),
                        kind,
                        event_id: event.event_id(),
                        error,
                    });
                }
                FailurePolicy::Abort => {
                    tracing::error!(
                        handler = handler.name(),
                        domain_event = kind.name(),
                        event_id = %event.event_id(),
                        error = %error,
                        "domain event handler failed, aborting dispatch"
                    );
                    return Err(DispatchError::HandlerFailed {
                        handler: handler.name(),
                        kind,
                        event_id: event.event_id(),
                        source: error,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Runs one handler, turning a panic into [`HandlerError::Panicked`].
async fn invoke(
    handler: &dyn EventHandler,
    event: &DomainEvent,
    cancel: &CancellationToken,
) -> std::result::Result<(), HandlerError> {
    match AssertUnwindSafe(handler.handle(event, cancel))
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::TodoListId;
    use domain::{HasDomainEvents, TodoItem};
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(&'static str, EventKind)>>>;

    /// Records every call; optionally fails or panics.
    struct ProbeHandler {
        name: &'static str,
        kind: EventKind,
        calls: Calls,
        behaviour: Behaviour,
    }

    #[derive(Clone, Copy)]
    enum Behaviour {
        Succeed,
        Fail,
        Panic,
        /// Fails and cancels the dispatch it is running in.
        FailAndCancel,
    }

    #[async_trait]
    impl EventHandler for ProbeHandler {
        fn name(&self) -> &'static str {
            self.name
        }

        fn subscribes_to(&self) -> EventKind {
            self.kind
        }

        async fn handle(
            &self,
            event: &DomainEvent,
            cancel: &CancellationToken,
        ) -> std::result::Result<(), HandlerError> {
            self.calls.lock().unwrap().push((self.name, event.kind()));
            match self.behaviour {
                Behaviour::Succeed => Ok(()),
                Behaviour::Fail => Err(HandlerError::Failed("boom".to_string())),
                Behaviour::Panic => panic!("handler exploded"),
                Behaviour::FailAndCancel => {
                    cancel.cancel();
                    Err(HandlerError::Failed("shutting down".to_string()))
                }
            }
        }
    }

    fn probe(
        name: &'static str,
        kind: EventKind,
        behaviour: Behaviour,
        calls: &Calls,
    ) -> ProbeHandler {
        ProbeHandler {
            name,
            kind,
            calls: Arc::clone(calls),
            behaviour,
        }
    }

    /// Created, Completed and Deleted events for one item, in that order.
    fn item_lifecycle_events() -> Vec<DomainEvent> {
        let mut item = TodoItem::create(TodoListId::new(), "Pay rent").unwrap();
        item.mark_complete();
        item.delete();
        item.take_domain_events()
    }

    fn calls_of(calls: &Calls) -> Vec<(&'static str, EventKind)> {
        calls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_delivers_each_event_to_matching_handlers_only() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("created", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .register(probe("completed", EventKind::TodoItemCompleted, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::new(registry);

        let report = dispatcher
            .dispatch(item_lifecycle_events(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            calls_of(&calls),
            vec![
                ("created", EventKind::TodoItemCreated),
                ("completed", EventKind::TodoItemCompleted),
            ]
        );
        assert_eq!(report.events_dispatched, 3);
        assert_eq!(report.handler_invocations, 2);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_event_without_handlers_is_a_no_op() {
        let dispatcher = EventDispatcher::new(HandlerRegistry::builder().build());

        let report = dispatcher
            .dispatch(item_lifecycle_events(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.handler_invocations, 0);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_continue_policy_isolates_failures() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("failing", EventKind::TodoItemCreated, Behaviour::Fail, &calls))
            .register(probe("after", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .register(probe("completed", EventKind::TodoItemCompleted, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::with_policy(registry, FailurePolicy::Continue);
        let events = item_lifecycle_events();
        let created_id = events[0].event_id();

        let report = dispatcher
            .dispatch(events, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            calls_of(&calls),
            vec![
                ("failing", EventKind::TodoItemCreated),
                ("after", EventKind::TodoItemCreated),
                ("completed", EventKind::TodoItemCompleted),
            ]
        );
        assert_eq!(
            report.failures,
            vec![HandlerFailure {
                handler: "failing",
                kind: EventKind::TodoItemCreated,
                event_id: created_id,
                error: HandlerError::Failed("boom".to_string()),
            }]
        );
        assert_eq!(report.events_dispatched, 3);
    }

    #[tokio::test]
    async fn test_abort_policy_stops_at_first_failure() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("failing", EventKind::TodoItemCreated, Behaviour::Fail, &calls))
            .register(probe("after", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .register(probe("completed", EventKind::TodoItemCompleted, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::with_policy(registry, FailurePolicy::Abort);

        let result = dispatcher
            .dispatch(item_lifecycle_events(), &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(DispatchError::HandlerFailed {
                handler: "failing",
                kind: EventKind::TodoItemCreated,
                ..
            })
        ));
        assert_eq!(
            calls_of(&calls),
            vec![("failing", EventKind::TodoItemCreated)]
        );
    }

    #[tokio::test]
    async fn test_panicking_handler_is_reported_as_failure() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("panicky", EventKind::TodoItemCreated, Behaviour::Panic, &calls))
            .register(probe("after", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::new(registry);

        let report = dispatcher
            .dispatch(item_lifecycle_events(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].error,
            HandlerError::Panicked("handler exploded".to_string())
        );
        assert_eq!(calls_of(&calls).len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_dispatch() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("created", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::new(registry);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = dispatcher.dispatch(item_lifecycle_events(), &cancel).await;

        assert_eq!(
            result,
            Err(DispatchError::Cancelled {
                delivered: 0,
                total: 3,
                failures: Vec::new(),
            })
        );
        assert!(calls_of(&calls).is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_mid_cycle_keeps_isolated_failures() {
        let calls = Calls::default();
        let registry = HandlerRegistry::builder()
            .register(probe("stopping", EventKind::TodoItemCreated, Behaviour::FailAndCancel, &calls))
            .register(probe("after", EventKind::TodoItemCreated, Behaviour::Succeed, &calls))
            .register(probe("completed", EventKind::TodoItemCompleted, Behaviour::Succeed, &calls))
            .build();
        let dispatcher = EventDispatcher::with_policy(registry, FailurePolicy::Continue);
        let events = item_lifecycle_events();
        let created_id = events[0].event_id();

        let result = dispatcher.dispatch(events, &CancellationToken::new()).await;

        assert_eq!(
            result,
            Err(DispatchError::Cancelled {
                delivered: 1,
                total: 3,
                failures: vec![HandlerFailure {
                    handler: "stopping",
                    kind: EventKind::TodoItemCreated,
                    event_id: created_id,
                    error: HandlerError::Failed("shutting down".to_string()),
                }],
            })
        );
        // Handlers of the event in flight still run; later events do not.
        assert_eq!(
            calls_of(&calls),
            vec![
                ("stopping", EventKind::TodoItemCreated),
                ("after", EventKind::TodoItemCreated),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_dispatch() {
        let dispatcher = EventDispatcher::new(HandlerRegistry::default());
        let report = dispatcher
            .dispatch(Vec::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report, DispatchReport::default());
    }

    #[test]
    fn test_failure_policy_parsing() {
        assert_eq!(
            "continue".parse::<FailurePolicy>(),
            Ok(FailurePolicy::Continue)
        );
        assert_eq!(" ABORT ".parse::<FailurePolicy>(), Ok(FailurePolicy::Abort));
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
        assert_eq!(FailurePolicy::Abort.to_string(), "abort");
    }
}
