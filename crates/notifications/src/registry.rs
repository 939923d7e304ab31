//! Static mapping from event kind to subscribed handlers.

use std::collections::HashMap;
use std::sync::Arc;

use domain::EventKind;

use crate::handler::EventHandler;

/// Maps each event kind to the handlers subscribed to it, in registration
/// order.
///
/// Built once at startup through [`HandlerRegistryBuilder`] and immutable
/// afterwards. Clones share the same handler instances.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    by_kind: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistry {
    /// Starts building a registry.
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Returns the handlers subscribed to exactly `kind`.
    ///
    /// A kind nobody subscribed to resolves to an empty slice.
    pub fn resolve(&self, kind: EventKind) -> &[Arc<dyn EventHandler>] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the total number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Returns the kinds that have at least one handler, in declaration order.
    pub fn subscribed_kinds(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| !self.resolve(*kind).is_empty())
            .collect()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            let names: Vec<_> = self.resolve(kind).iter().map(|h| h.name()).collect();
            if !names.is_empty() {
                map.entry(&kind.name(), &names);
            }
        }
        map.finish()
    }
}

/// Collects handlers before freezing them into a [`HandlerRegistry`].
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    by_kind: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistryBuilder {
    /// Registers a handler under the kind it subscribes to.
    pub fn register<H: EventHandler + 'static>(self, handler: H) -> Self {
        self.register_shared(Arc::new(handler))
    }

    /// Registers an already shared handler.
    pub fn register_shared(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let kind = handler.subscribes_to();
        tracing::debug!(handler = handler.name(), kind = kind.name(), "handler registered");
        self.by_kind.entry(kind).or_default().push(handler);
        self
    }

    /// Freezes the registry.
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            by_kind: self.by_kind,
        }
    }
}
