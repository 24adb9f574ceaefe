//! Event Bus implementation.
//!
//! Provides the core EventBus struct. A bus is constructed explicitly by the
//! host and shared with the components that need it, typically as
//! `Arc<EventBus<E>>`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::events::{BusEvent, EventPayload};
use crate::error::{EventBusError, HandlerResult, Result};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for event handler functions
type EventHandler<E> = Arc<dyn Fn(&E) -> HandlerResult + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Name attached to every log line emitted by the bus.
    pub name: String,
    /// Maximum number of subscribers per event kind, unlimited when `None`.
    pub max_subscribers_per_kind: Option<usize>,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            name: "event-bus".to_string(),
            max_subscribers_per_kind: None,
        }
    }
}

struct Subscriber<E> {
    id: SubscriptionId,
    handler: EventHandler<E>,
}

impl<E> Clone for Subscriber<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Subscriber lists per kind, in registration order
struct Registry<E: BusEvent> {
    subscribers: HashMap<E::Kind, Vec<Subscriber<E>>>,
    index: HashMap<SubscriptionId, E::Kind>,
    closed: bool,
}

impl<E: BusEvent> Registry<E> {
    fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            index: HashMap::new(),
            closed: false,
        }
    }
}

/// Synchronous, kind-keyed publish/subscribe dispatcher
///
/// Handlers run on the publishing thread, in the order they subscribed.
/// The registry lock is released before any handler runs, so handlers may
/// subscribe, unsubscribe or publish on the same bus.
pub struct EventBus<E: BusEvent> {
    /// Registered handlers
    registry: RwLock<Registry<E>>,
    /// Configuration
    config: EventBusConfig,
}

impl<E: BusEvent> EventBus<E> {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        tracing::debug!(bus = %config.name, "Event bus created");
        Self {
            registry: RwLock::new(Registry::new()),
            config,
        }
    }

    /// Subscribe a handler to events of one kind
    ///
    /// The handler will be called on the publishing thread, so it should
    /// return quickly to avoid blocking event dispatch. Each call returns a
    /// new handle, even when the same function is registered twice.
    pub fn subscribe<F>(&self, kind: E::Kind, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(
            kind,
            Arc::new(move |event: &E| {
                handler(event);
                Ok(())
            }),
        )
    }

    /// Subscribe a handler that can fail
    ///
    /// An error returned by the handler stops the current dispatch and is
    /// returned from [`publish`](Self::publish).
    pub fn subscribe_fallible<F>(&self, kind: E::Kind, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(handler))
    }

    /// Subscribe a handler to a payload type
    ///
    /// The kind is taken from `P`, and the handler receives the payload
    /// instead of the whole event.
    pub fn subscribe_payload<P, F>(&self, handler: F) -> Result<SubscriptionId>
    where
        P: EventPayload<E>,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.subscribe(P::KIND, move |event: &E| {
            if let Some(payload) = P::extract(event) {
                handler(payload);
            }
        })
    }

    fn register(&self, kind: E::Kind, handler: EventHandler<E>) -> Result<SubscriptionId> {
        let mut guard = self.registry.write();
        let registry = &mut *guard;
        if registry.closed {
            return Err(EventBusError::Closed);
        }

        if let Some(limit) = self.config.max_subscribers_per_kind {
            let count = registry.subscribers.get(&kind).map_or(0, Vec::len);
            if count >= limit {
                tracing::warn!(bus = %self.config.name, %kind, limit, "Subscriber limit reached");
                return Err(EventBusError::SubscriberLimit {
                    kind: kind.to_string(),
                    limit,
                });
            }
        }

        let id = SubscriptionId::new();
        registry
            .subscribers
            .entry(kind)
            .or_default()
            .push(Subscriber { id, handler });
        registry.index.insert(id, kind);
        tracing::debug!(bus = %self.config.name, %kind, "Subscription {} added", id);
        Ok(id)
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed. Unknown or
    /// already removed handles are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.registry.write();
        let registry = &mut *guard;
        let Some(kind) = registry.index.remove(&id) else {
            return false;
        };

        let now_empty = match registry.subscribers.get_mut(&kind) {
            Some(subscribers) => {
                subscribers.retain(|s| s.id != id);
                subscribers.is_empty()
            }
            None => false,
        };
        if now_empty {
            registry.subscribers.remove(&kind);
        }

        tracing::debug!(bus = %self.config.name, %kind, "Subscription {} removed", id);
        true
    }

    /// Publish an event to every handler subscribed to its kind
    ///
    /// Returns the number of handlers invoked. Publishing a kind nobody
    /// listens to is not an error. Handlers subscribed or removed while this
    /// call is running take effect from the next publish. A handler panic
    /// unwinds to the caller.
    pub fn publish(&self, event: E) -> Result<usize> {
        let kind = event.kind();
        let subscribers = {
            let registry = self.registry.read();
            if registry.closed {
                return Err(EventBusError::Closed);
            }
            match registry.subscribers.get(&kind) {
                Some(subscribers) => subscribers.clone(),
                None => {
                    tracing::trace!(bus = %self.config.name, %kind, "No subscribers");
                    return Ok(0);
                }
            }
        };

        tracing::trace!(
            bus = %self.config.name,
            %kind,
            subscribers = subscribers.len(),
            "Publishing event"
        );

        for subscriber in &subscribers {
            if let Err(source) = (subscriber.handler)(&event) {
                tracing::warn!(
                    bus = %self.config.name,
                    %kind,
                    subscription = %subscriber.id,
                    error = %source,
                    "Event handler failed"
                );
                return Err(EventBusError::Handler {
                    kind: kind.to_string(),
                    subscription: subscriber.id,
                    source,
                });
            }
        }

        Ok(subscribers.len())
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.registry.read().index.len()
    }

    /// Get the number of active subscriptions for one kind
    pub fn subscriber_count_for(&self, kind: E::Kind) -> usize {
        self.registry.read().subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Check whether anything listens to a kind
    pub fn has_subscribers(&self, kind: E::Kind) -> bool {
        self.subscriber_count_for(kind) > 0
    }

    /// Tear the bus down
    ///
    /// Drops every subscription and rejects further subscribe and publish
    /// calls. Returns the number of subscriptions removed; calling it again
    /// returns 0.
    pub fn shutdown(&self) -> usize {
        let mut registry = self.registry.write();
        if registry.closed {
            return 0;
        }

        let removed = registry.index.len();
        registry.subscribers.clear();
        registry.index.clear();
        registry.closed = true;
        tracing::info!(bus = %self.config.name, removed, "Event bus shut down");
        removed
    }

    /// Check whether [`shutdown`](Self::shutdown) has been called
    pub fn is_closed(&self) -> bool {
        self.registry.read().closed
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .finish()
    }
}
