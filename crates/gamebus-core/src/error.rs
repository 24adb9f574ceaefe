//! Error handling for gamebus
//!
//! The bus itself declares very few failure modes:
//! - Operations on a bus that has been shut down
//! - A per-kind subscriber limit being exceeded
//! - A fallible handler reporting an error during dispatch
//!
//! Unsubscribing an unknown handle and publishing to a kind without
//! listeners are deliberately not errors.

use thiserror::Error;

use crate::event_bus::SubscriptionId;

/// Boxed error type returned by fallible handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of a fallible event handler.
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Error types for event bus operations
#[derive(Error, Debug)]
pub enum EventBusError {
    /// The bus was shut down and no longer accepts work
    #[error("Event bus is closed")]
    Closed,

    /// Subscribing would exceed the configured per-kind limit
    #[error("Subscriber limit of {limit} reached for {kind} events")]
    SubscriberLimit {
        /// The event kind that is full.
        kind: String,
        /// The configured limit.
        limit: usize,
    },

    /// A handler failed while an event was being dispatched
    #[error("Handler {subscription} failed while handling {kind} event: {source}")]
    Handler {
        /// The kind of the event being dispatched.
        kind: String,
        /// The subscription whose handler failed.
        subscription: SubscriptionId,
        /// The error reported by the handler.
        #[source]
        source: BoxError,
    },
}

impl EventBusError {
    /// Check if this error came from a subscriber rather than the bus itself
    pub fn is_handler_error(&self) -> bool {
        matches!(self, EventBusError::Handler { .. })
    }

    /// The subscription responsible for this error, if any
    pub fn subscription(&self) -> Option<SubscriptionId> {
        match self {
            EventBusError::Handler { subscription, .. } => Some(*subscription),
            _ => None,
        }
    }
}

/// Result type alias for gamebus operations
pub type Result<T> = std::result::Result<T, EventBusError>;
