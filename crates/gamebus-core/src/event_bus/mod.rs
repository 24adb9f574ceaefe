//! # Event Bus Module
//!
//! Provides a kind-keyed event bus for decoupled communication between
//! application components.
//!
//! ## Overview
//!
//! The event bus enables publish/subscribe patterns across the application:
//! - Publishers emit events without knowing subscribers
//! - Subscribers register for one kind of event and get a handle back
//! - Handlers run synchronously on the publishing thread, in registration order
//!
//! There is no global instance. The host creates a bus, hands it to its
//! components (usually as `Arc<EventBus<E>>`) and shuts it down when done.
//!
//! ## Usage
//!
//! ```rust
//! use gamebus_core::event_bus::{DamageEvent, EventBus, EventKind, GameEvent};
//!
//! let bus = EventBus::<GameEvent>::new();
//!
//! // Subscribe to damage events
//! let subscription = bus
//!     .subscribe(EventKind::Damage, |event| {
//!         println!("{}", event.description());
//!     })
//!     .unwrap();
//!
//! // Publish an event
//! let delivered = bus
//!     .publish(GameEvent::from(DamageEvent {
//!         target: "goblin".to_string(),
//!         amount: 10,
//!     }))
//!     .unwrap();
//! assert_eq!(delivered, 1);
//!
//! // Unsubscribe when done
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
