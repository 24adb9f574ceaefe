//! # gamebus Core
//!
//! Kind-keyed publish/subscribe event bus for real-time interactive
//! applications. Provides the bus itself, the traits that tie events to
//! their kinds, a bundled game event vocabulary and the error types.

pub mod error;
pub mod event_bus;

pub use error::{BoxError, EventBusError, HandlerResult, Result};

// Re-export event bus for convenience
pub use event_bus::{
    BusEvent, DamageEvent, EventBus, EventBusConfig, EventKind, EventPayload, GameEvent,
    HealEvent, PlayerDiedEvent, SceneLoadedEvent, ScoreChangedEvent, SubscriptionId,
};
