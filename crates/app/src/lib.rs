//! Todo application wired to the domain event pipeline.
//!
//! Provides the [`TodoService`] use cases, configuration, tracing setup and
//! the bootstrap that connects a store to the logging handlers.

pub mod config;
pub mod error;
pub mod queries;
pub mod seed;
pub mod service;
pub mod telemetry;

use std::sync::Arc;

use common::TodoListId;
use notifications::{
    EventDispatcher, EventLogger, HandlerRegistry, TodoItemCompletedHandler,
    TodoItemCreatedHandler, TracingEventLogger,
};
use store::TodoStore;
use tokio_util::sync::CancellationToken;

pub use config::{Config, LogFormat};
pub use error::{AppError, Result};
pub use queries::{PaginatedList, TodoListView};
pub use service::TodoService;

/// Registers the created and completed logging handlers.
pub fn build_registry(logger: Arc<dyn EventLogger>) -> HandlerRegistry {
    HandlerRegistry::builder()
        .register(TodoItemCreatedHandler::new(Arc::clone(&logger)))
        .register(TodoItemCompletedHandler::new(logger))
        .build()
}

/// A bootstrapped application: configuration plus the wired service.
pub struct Application<S: TodoStore> {
    config: Config,
    service: TodoService<S>,
}

impl<S: TodoStore> Application<S> {
    /// Wires the service with handlers that log through `tracing`.
    pub fn bootstrap(store: S, config: &Config) -> Self {
        let logger = Arc::new(TracingEventLogger::new(config.app_name.clone()));
        Self::bootstrap_with_logger(store, config, logger)
    }

    /// Wires the service with handlers that log through `logger`.
    pub fn bootstrap_with_logger(store: S, config: &Config, logger: Arc<dyn EventLogger>) -> Self {
        let registry = build_registry(logger);
        tracing::info!(
            handlers = registry.handler_count(),
            policy = %config.failure_policy,
            "handler registry built"
        );

        let dispatcher = Arc::new(EventDispatcher::with_policy(
            registry,
            config.failure_policy,
        ));

        Self {
            config: config.clone(),
            service: TodoService::new(store, dispatcher),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TodoService<S> {
        &self.service
    }

    /// Seeds the default data unless disabled in the configuration.
    pub async fn seed(&self, cancel: &CancellationToken) -> Result<Option<TodoListId>> {
        if !self.config.seed_default_data {
            tracing::debug!("default data seeding disabled");
            return Ok(None);
        }
        seed::seed_default_data(&self.service, cancel).await
    }
}
