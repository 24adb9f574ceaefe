use gamebus_core::{DamageEvent, EventBus, EventKind, EventPayload, GameEvent, HealEvent};
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<(&'static str, u32)>>>;

fn damage(amount: u32) -> GameEvent {
    DamageEvent {
        target: "player".to_string(),
        amount,
    }
    .into()
}

fn recorder(name: &'static str, log: &CallLog) -> impl Fn(&GameEvent) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |event: &GameEvent| {
        if let Some(payload) = DamageEvent::extract(event) {
            log.lock().expect("call log").push((name, payload.amount));
        }
    }
}

#[test]
fn test_two_listeners_then_unsubscribe_first() {
    let bus = EventBus::<GameEvent>::new();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    let a = bus
        .subscribe(EventKind::Damage, recorder("A", &log))
        .expect("subscribe A");
    bus.subscribe(EventKind::Damage, recorder("B", &log))
        .expect("subscribe B");

    assert_eq!(bus.publish(damage(10)).expect("publish"), 2);
    assert_eq!(*log.lock().expect("call log"), vec![("A", 10), ("B", 10)]);

    assert!(bus.unsubscribe(a));
    log.lock().expect("call log").clear();

    assert_eq!(bus.publish(damage(10)).expect("publish"), 1);
    assert_eq!(*log.lock().expect("call log"), vec![("B", 10)]);
}

#[test]
fn test_isolated_buses_do_not_share_subscribers() {
    let first = EventBus::<GameEvent>::new();
    let second = EventBus::<GameEvent>::new();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    first
        .subscribe(EventKind::Damage, recorder("first", &log))
        .expect("subscribe");

    assert_eq!(second.publish(damage(3)).expect("publish"), 0);
    assert!(log.lock().expect("call log").is_empty());

    assert_eq!(first.publish(damage(3)).expect("publish"), 1);
    assert_eq!(*log.lock().expect("call log"), vec![("first", 3)]);
}

#[test]
fn test_payload_listener_sees_only_its_kind() {
    let bus = EventBus::<GameEvent>::new();
    let healed = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&healed);
    bus.subscribe_payload(move |heal: &HealEvent| {
        sink.lock().expect("heal log").push(heal.target.clone());
    })
    .expect("subscribe");

    bus.publish(damage(5)).expect("publish");
    bus.publish(GameEvent::from(HealEvent {
        target: "medic".to_string(),
        amount: 20,
    }))
    .expect("publish");

    assert_eq!(*healed.lock().expect("heal log"), vec!["medic".to_string()]);
}
