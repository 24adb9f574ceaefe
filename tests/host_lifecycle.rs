use gamebus::{
    CombatLog, DamageEvent, EventBusConfig, EventBusError, EventKind, GameEvent, GameHost,
    HealthTracker,
};

fn damage(target: &str, amount: u32) -> GameEvent {
    DamageEvent {
        target: target.to_string(),
        amount,
    }
    .into()
}

#[test]
fn test_components_share_injected_bus() {
    let host = GameHost::start(EventBusConfig {
        name: "integration".to_string(),
        ..Default::default()
    });
    let bus = host.bus();

    let log = CombatLog::attach(&bus).expect("attach log");
    let tracker = HealthTracker::attach(&bus, 20).expect("attach tracker");

    bus.publish(damage("player", 10)).expect("publish");
    bus.publish(damage("player", 10)).expect("publish");

    assert_eq!(tracker.health("player"), 0);
    assert_eq!(
        log.entries(),
        vec![
            "player took 10 damage",
            "player took 10 damage",
            "player died",
        ]
    );
}

#[test]
fn test_death_notice_is_logged_before_outer_dispatch_continues() {
    let bus = GameHost::default().bus();

    // Tracker first, so the nested PlayerDied publish runs before the log sees the hit
    let _tracker = HealthTracker::attach(&bus, 5).expect("attach tracker");
    let log = CombatLog::attach(&bus).expect("attach log");

    bus.publish(damage("npc", 5)).expect("publish");
    assert_eq!(log.entries(), vec!["npc died", "npc took 5 damage"]);
}

#[test]
fn test_shutdown_reports_live_subscriptions() {
    let host = GameHost::default();
    let bus = host.bus();
    let _log = CombatLog::attach(&bus).expect("attach log");

    assert_eq!(host.shutdown(), EventKind::ALL.len());
    assert!(matches!(
        bus.publish(damage("player", 1)),
        Err(EventBusError::Closed)
    ));
    assert!(matches!(
        CombatLog::attach(&bus),
        Err(EventBusError::Closed)
    ));
}
