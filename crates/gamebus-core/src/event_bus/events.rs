//! Event type definitions for the event bus.
//!
//! [`BusEvent`] ties an event value to the kind it is dispatched under, and
//! [`EventPayload`] lets listeners subscribe by payload type. The rest of the
//! module is a ready-made vocabulary for game-style applications.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// An event that can be published on an [`EventBus`](super::EventBus).
///
/// The kind is derived from the event value itself, so a publisher never
/// names it separately.
pub trait BusEvent: Send + Sync + 'static {
    /// Tag identifying a category of events.
    type Kind: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Get the kind this event is dispatched under
    fn kind(&self) -> Self::Kind;
}

/// A payload type carried by exactly one kind of `E`.
///
/// Used by [`EventBus::subscribe_payload`](super::EventBus::subscribe_payload)
/// to register typed listeners.
pub trait EventPayload<E: BusEvent>: Sized + 'static {
    /// The kind whose events carry this payload.
    const KIND: E::Kind;

    /// Borrow the payload out of an event, if the event carries it
    fn extract(event: &E) -> Option<&Self>;
}

/// Root event enum for the bundled game events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An entity took damage
    Damage(DamageEvent),
    /// An entity was healed
    Heal(HealEvent),
    /// A player's score changed
    ScoreChanged(ScoreChangedEvent),
    /// A player died
    PlayerDied(PlayerDiedEvent),
    /// A scene finished loading
    SceneLoaded(SceneLoadedEvent),
}

impl GameEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            GameEvent::Damage(e) => format!("{} took {} damage", e.target, e.amount),
            GameEvent::Heal(e) => format!("{} healed for {}", e.target, e.amount),
            GameEvent::ScoreChanged(e) => format!("{} score is now {}", e.player, e.score),
            GameEvent::PlayerDied(e) => match &e.killer {
                Some(killer) => format!("{} was defeated by {}", e.player, killer),
                None => format!("{} died", e.player),
            },
            GameEvent::SceneLoaded(e) => format!("Scene '{}' loaded", e.scene),
        }
    }
}

impl BusEvent for GameEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            GameEvent::Damage(_) => EventKind::Damage,
            GameEvent::Heal(_) => EventKind::Heal,
            GameEvent::ScoreChanged(_) => EventKind::ScoreChanged,
            GameEvent::PlayerDied(_) => EventKind::PlayerDied,
            GameEvent::SceneLoaded(_) => EventKind::SceneLoaded,
        }
    }
}

/// Event kind for [`GameEvent`] dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Damage events.
    Damage,
    /// Heal events.
    Heal,
    /// Score change events.
    ScoreChanged,
    /// Player death events.
    PlayerDied,
    /// Scene load events.
    SceneLoaded,
}

impl EventKind {
    /// All kinds, in declaration order
    pub const ALL: [EventKind; 5] = [
        EventKind::Damage,
        EventKind::Heal,
        EventKind::ScoreChanged,
        EventKind::PlayerDied,
        EventKind::SceneLoaded,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Damage => write!(f, "Damage"),
            EventKind::Heal => write!(f, "Heal"),
            EventKind::ScoreChanged => write!(f, "ScoreChanged"),
            EventKind::PlayerDied => write!(f, "PlayerDied"),
            EventKind::SceneLoaded => write!(f, "SceneLoaded"),
        }
    }
}

/// Damage dealt to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Entity receiving the damage.
    pub target: String,
    /// Amount of damage dealt.
    pub amount: u32,
}

/// Health restored to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealEvent {
    /// Entity being healed.
    pub target: String,
    /// Amount of health restored.
    pub amount: u32,
}

/// New score for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreChangedEvent {
    /// Player whose score changed.
    pub player: String,
    /// The score after the change.
    pub score: i64,
}

/// A player was removed from play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDiedEvent {
    /// Player who died.
    pub player: String,
    /// Entity responsible, if any.
    pub killer: Option<String>,
}

/// A scene finished loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLoadedEvent {
    /// Name of the scene.
    pub scene: String,
}

/// Wire a payload struct to its [`GameEvent`] variant
macro_rules! game_payload {
    ($payload:ty, $variant:ident) => {
        impl EventPayload<GameEvent> for $payload {
            const KIND: EventKind = EventKind::$variant;

            fn extract(event: &GameEvent) -> Option<&Self> {
                match event {
                    GameEvent::$variant(payload) => Some(payload),
                    _ => None,
                }
            }
        }

        impl From<$payload> for GameEvent {
            fn from(payload: $payload) -> Self {
                GameEvent::$variant(payload)
            }
        }
    };
}

game_payload!(DamageEvent, Damage);
game_payload!(HealEvent, Heal);
game_payload!(ScoreChangedEvent, ScoreChanged);
game_payload!(PlayerDiedEvent, PlayerDied);
game_payload!(SceneLoadedEvent, SceneLoaded);

#[cfg(test)]
mod tests {
    use super::*;

    fn damage(amount: u32) -> GameEvent {
        DamageEvent {
            target: "goblin".to_string(),
            amount,
        }
        .into()
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(damage(3).kind(), EventKind::Damage);
        assert_eq!(
            GameEvent::from(SceneLoadedEvent {
                scene: "forest".to_string()
            })
            .kind(),
            EventKind::SceneLoaded
        );
    }

    #[test]
    fn test_payload_kinds_agree_with_events() {
        assert_eq!(<DamageEvent as EventPayload<GameEvent>>::KIND, EventKind::Damage);
        assert_eq!(<HealEvent as EventPayload<GameEvent>>::KIND, EventKind::Heal);
        assert_eq!(
            <PlayerDiedEvent as EventPayload<GameEvent>>::KIND,
            EventKind::PlayerDied
        );
    }

    #[test]
    fn test_extract_only_matching_payload() {
        let event = damage(10);
        assert_eq!(DamageEvent::extract(&event).map(|d| d.amount), Some(10));
        assert!(HealEvent::extract(&event).is_none());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(damage(10).description(), "goblin took 10 damage");

        let died = GameEvent::from(PlayerDiedEvent {
            player: "alice".to_string(),
            killer: Some("dragon".to_string()),
        });
        assert_eq!(died.description(), "alice was defeated by dragon");
    }

    #[test]
    fn test_kind_display_is_unique() {
        let names: std::collections::HashSet<String> =
            EventKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names.len(), EventKind::ALL.len());
    }

    #[test]
    fn test_event_serializes_with_variant_tag() {
        let json = serde_json::to_string(&damage(7)).expect("serialize");
        assert_eq!(json, r#"{"Damage":{"target":"goblin","amount":7}}"#);

        let back: GameEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, damage(7));
    }
}
