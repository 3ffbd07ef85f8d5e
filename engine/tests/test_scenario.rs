//! Tests for scenario expansion and calendar seeding.

use std::sync::Arc;

use process_simulator_core_rs::{
    EventCalendar, EventKind, EventSchedule, EventSpec, ScheduledEvent, SimpleEventCalendar,
    SimulationError, SimulationScenario, VirtualClock,
};
use serde_json::json;

fn one_time(kind: &str, time: i64) -> ScheduledEvent {
    ScheduledEvent {
        spec: EventSpec::new(EventKind::custom(kind)),
        schedule: EventSchedule::OneTime { time },
    }
}

#[test]
fn test_expand_carries_spec_fields() {
    let mut spec = EventSpec::new(EventKind::custom("start-process"));
    spec.priority = -1;
    spec.payload = Some(json!("invoice"));
    spec.properties.insert("business_key".to_string(), json!("bk-1"));

    let scenario = SimulationScenario::new(vec![ScheduledEvent {
        spec,
        schedule: EventSchedule::OneTime { time: 250 },
    }]);

    let events = scenario.expand().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].time(), Some(250));
    assert_eq!(events[0].priority(), -1);
    assert_eq!(events[0].payload(), Some(&json!("invoice")));
    assert_eq!(events[0].property("business_key"), Some(&json!("bk-1")));
}

#[test]
fn test_seed_into_orders_by_schedule() {
    let scenario = SimulationScenario::new(vec![
        one_time("late", 300),
        one_time("early", 100),
        one_time("mid", 200),
    ]);

    let mut calendar = SimpleEventCalendar::new(Arc::new(VirtualClock::new(0)));
    let seeded = scenario.seed_into(&mut calendar).unwrap();
    assert_eq!(seeded, 3);

    let mut order = Vec::new();
    while let Some(event) = calendar.remove_first().unwrap() {
        order.push(event.kind().clone());
    }
    assert_eq!(
        order,
        vec![
            EventKind::custom("early"),
            EventKind::custom("mid"),
            EventKind::custom("late"),
        ]
    );
}

#[test]
fn test_repeating_schedule_is_a_hard_failure() {
    let scenario = SimulationScenario::new(vec![ScheduledEvent {
        spec: EventSpec::new(EventKind::custom("poll")),
        schedule: EventSchedule::Repeating {
            start: 0,
            interval: 60_000,
            count: 10,
        },
    }]);

    assert!(matches!(
        scenario.expand(),
        Err(SimulationError::Unsupported(_))
    ));

    // Seeding goes through expansion, so nothing is half-seeded.
    let mut calendar = SimpleEventCalendar::new(Arc::new(VirtualClock::new(0)));
    assert!(scenario.seed_into(&mut calendar).is_err());
    assert!(calendar.is_empty());
}

#[test]
fn test_scenario_from_json() {
    let raw = r#"{
        "events": [
            {
                "spec": { "kind": { "custom": "start-process" } },
                "schedule": { "time": 100 }
            },
            {
                "spec": { "kind": "end_simulation", "priority": 1 },
                "schedule": { "time": 900 }
            }
        ]
    }"#;

    let scenario: SimulationScenario = serde_json::from_str(raw).unwrap();
    let events = scenario.expand().unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind(), &EventKind::custom("start-process"));
    assert_eq!(events[0].time(), Some(100));
    assert_eq!(events[1].kind(), &EventKind::EndSimulation);
    assert_eq!(events[1].priority(), 1);
}
