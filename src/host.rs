//! Host lifecycle for the process-wide bus.
//!
//! The host is the single construction point of the bus and the single place
//! that tears it down. Everything else borrows it through [`SharedBus`].

use std::sync::Arc;

use gamebus_core::{EventBus, EventBusConfig, GameEvent};

/// Bus handle passed to components
pub type SharedBus = Arc<EventBus<GameEvent>>;

/// Owner of the application's event bus
#[derive(Debug)]
pub struct GameHost {
    bus: SharedBus,
}

impl GameHost {
    /// Create the bus for this process
    pub fn start(config: EventBusConfig) -> Self {
        tracing::info!(bus = %config.name, "Starting event bus");
        Self {
            bus: Arc::new(EventBus::with_config(config)),
        }
    }

    /// Get a handle to inject into components
    pub fn bus(&self) -> SharedBus {
        Arc::clone(&self.bus)
    }

    /// Tear the bus down, returning how many subscriptions were still live
    ///
    /// Components still holding a handle see `EventBusError::Closed` from
    /// then on.
    pub fn shutdown(self) -> usize {
        self.bus.shutdown()
    }
}

impl Default for GameHost {
    fn default() -> Self {
        Self::start(EventBusConfig::default())
    }
}
