use gamebus::{
    init_logging, CombatLog, DamageEvent, EventBusConfig, EventKind, GameEvent, GameHost,
    HealthTracker, SceneLoadedEvent, BUILD_DATE, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!(version = VERSION, built = BUILD_DATE, "gamebus demo starting");

    let host = GameHost::start(EventBusConfig {
        name: "game".to_string(),
        ..Default::default()
    });
    let bus = host.bus();

    let mut combat_log = CombatLog::attach(&bus)?;
    let mut health = HealthTracker::attach(&bus, 25)?;

    let a = bus.subscribe(EventKind::Damage, |event: &GameEvent| {
        tracing::info!(listener = "A", "{}", event.description());
    })?;
    bus.subscribe(EventKind::Damage, |event: &GameEvent| {
        tracing::info!(listener = "B", "{}", event.description());
    })?;

    bus.publish(GameEvent::from(SceneLoadedEvent {
        scene: "arena".to_string(),
    }))?;

    let hit = DamageEvent {
        target: "player".to_string(),
        amount: 10,
    };
    let delivered = bus.publish(GameEvent::from(hit.clone()))?;
    tracing::info!(delivered, "First damage event dispatched");

    bus.unsubscribe(a);
    let delivered = bus.publish(GameEvent::from(hit.clone()))?;
    tracing::info!(delivered, "Second damage event dispatched after A left");

    bus.publish(GameEvent::from(hit))?;
    tracing::info!(health = health.health("player"), "Player health after three hits");

    health.detach();
    combat_log.detach();
    tracing::info!(entries = combat_log.entries().len(), "Combat log closed");

    drop(bus);
    let remaining = host.shutdown();
    tracing::info!(remaining, "gamebus demo finished");
    Ok(())
}
