//! Sample components that talk through the bus.
//!
//! Both take the bus at construction time and keep the handles of their
//! subscriptions so they can detach cleanly.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use gamebus_core::{
    DamageEvent, EventKind, EventPayload, GameEvent, HealEvent, PlayerDiedEvent, Result,
    SubscriptionId,
};

use crate::host::SharedBus;

/// Records a description of every event on the bus
#[derive(Debug)]
pub struct CombatLog {
    bus: SharedBus,
    entries: Arc<Mutex<Vec<String>>>,
    subscriptions: Vec<SubscriptionId>,
}

impl CombatLog {
    /// Subscribe to every [`EventKind`]
    pub fn attach(bus: &SharedBus) -> Result<Self> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let mut subscriptions = Vec::with_capacity(EventKind::ALL.len());

        for kind in EventKind::ALL {
            let entries = Arc::clone(&entries);
            subscriptions.push(bus.subscribe(kind, move |event: &GameEvent| {
                let line = event.description();
                tracing::info!(%kind, "{}", line);
                entries.lock().push(line);
            })?);
        }

        Ok(Self {
            bus: Arc::clone(bus),
            entries,
            subscriptions,
        })
    }

    /// Get a copy of the recorded lines
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Stop recording
    pub fn detach(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

/// Tracks entity health from damage and heal events
///
/// Publishes [`PlayerDiedEvent`] when an entity's health reaches zero.
#[derive(Debug)]
pub struct HealthTracker {
    bus: SharedBus,
    health: Arc<Mutex<HashMap<String, u32>>>,
    max_health: u32,
    subscriptions: Vec<SubscriptionId>,
}

impl HealthTracker {
    /// Subscribe to damage and heal events
    ///
    /// Entities start at `max_health` the first time they are mentioned.
    pub fn attach(bus: &SharedBus, max_health: u32) -> Result<Self> {
        let health: Arc<Mutex<HashMap<String, u32>>> = Arc::new(Mutex::new(HashMap::new()));

        // Weak handle: the bus owns this handler, so a strong one would cycle
        let weak_bus = Arc::downgrade(bus);
        let damage_health = Arc::clone(&health);
        let on_damage = bus.subscribe_fallible(EventKind::Damage, move |event: &GameEvent| {
            let Some(damage) = DamageEvent::extract(event) else {
                return Ok(());
            };

            let died = {
                let mut health = damage_health.lock();
                let current = health.entry(damage.target.clone()).or_insert(max_health);
                if *current == 0 {
                    false
                } else {
                    *current = current.saturating_sub(damage.amount);
                    *current == 0
                }
            };

            if died {
                if let Some(bus) = weak_bus.upgrade() {
                    bus.publish(GameEvent::PlayerDied(PlayerDiedEvent {
                        player: damage.target.clone(),
                        killer: None,
                    }))?;
                }
            }
            Ok(())
        })?;

        let heal_health = Arc::clone(&health);
        let on_heal = bus.subscribe_payload(move |heal: &HealEvent| {
            let mut health = heal_health.lock();
            let current = health.entry(heal.target.clone()).or_insert(max_health);
            if *current > 0 {
                *current = current.saturating_add(heal.amount).min(max_health);
            }
        })?;

        Ok(Self {
            bus: Arc::clone(bus),
            health,
            max_health,
            subscriptions: vec![on_damage, on_heal],
        })
    }

    /// Current health of an entity
    pub fn health(&self, target: &str) -> u32 {
        self.health
            .lock()
            .get(target)
            .copied()
            .unwrap_or(self.max_health)
    }

    /// Stop tracking
    pub fn detach(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}
