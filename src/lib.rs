//! # gamebus
//!
//! A kind-keyed publish/subscribe event bus for real-time interactive
//! applications such as game loops.
//!
//! ## Architecture
//!
//! gamebus is organized as a workspace:
//!
//! 1. **gamebus-core** - Event bus, event traits, bundled game events, errors
//! 2. **gamebus** - Logging setup, host lifecycle, sample components and the
//!    demo binary
//!
//! The host owns the only bus of the process. Components receive it at
//! construction time instead of reaching for a global.

pub mod components;
pub mod host;

pub use gamebus_core::event_bus;

pub use gamebus_core::{
    BoxError, BusEvent, DamageEvent, EventBus, EventBusConfig, EventBusError, EventKind,
    EventPayload, GameEvent, HandlerResult, HealEvent, PlayerDiedEvent, Result, SceneLoadedEvent,
    ScoreChangedEvent, SubscriptionId,
};

pub use components::{CombatLog, HealthTracker};
pub use host::{GameHost, SharedBus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - Thread ids and line numbers on every record
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
