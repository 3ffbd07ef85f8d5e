//! Simulation events
//!
//! A [`SimulationEvent`] is a discrete, immutable occurrence consumed by the
//! run driver and dispatched to the handler registered for its kind. Events
//! are ordered by `(time, priority)`; an event without a time means
//! "immediate" and sorts before every timed event.
//!
//! # Design Principles
//!
//! 1. **Immutability**: once built, an event never changes, so it can be
//!    shared between the calendar and handlers without copying
//! 2. **Enum dispatch**: event kinds are a closed enum with a `Custom`
//!    escape hatch for scenario-defined kinds
//! 3. **Self-contained**: payload and named properties carry all data a
//!    handler needs
//!
//! # Example
//!
//! ```
//! use process_simulator_core_rs::{EventKind, SimulationEvent};
//! use serde_json::json;
//!
//! let event = SimulationEvent::builder(EventKind::custom("start-process"))
//!     .time(1_000)
//!     .property("process_key", json!("invoice"))
//!     .build();
//!
//! assert!(event.has_time());
//! assert_eq!(event.priority(), 0);
//! assert_eq!(event.property("process_key"), Some(&json!("invoice")));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::clock::SimTime;

/// Priority reserved for engine-internal control events.
///
/// Sorts before every default-priority event scheduled at the same time,
/// which is what guarantees a forced break wins its tick.
pub const PRIORITY_SYSTEM: i32 = -1;

/// Priority assigned when the builder is not told otherwise.
pub const PRIORITY_DEFAULT: i32 = 0;

/// Discriminator used for handler dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Marks the natural end of a scenario. The scenario run absorbs it
    /// with an internal no-op handler.
    EndSimulation,

    /// Control sentinel that stops a run immediately. Never dispatched to
    /// a handler.
    BreakSimulation,

    /// The engine's job-execution component has work available.
    AcquireJobNotification,

    /// Scenario-defined kind, dispatched by name.
    Custom(String),
}

impl EventKind {
    /// Build a scenario-defined kind.
    pub fn custom(name: impl Into<String>) -> Self {
        EventKind::Custom(name.into())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::EndSimulation => write!(f, "end_simulation"),
            EventKind::BreakSimulation => write!(f, "break_simulation"),
            EventKind::AcquireJobNotification => write!(f, "acquire_job_notification"),
            EventKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A scheduled occurrence: kind, optional simulation time, tie-break
/// priority, and payload data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    kind: EventKind,
    time: Option<SimTime>,
    priority: i32,
    payload: Option<Value>,
    properties: HashMap<String, Value>,
}

impl SimulationEvent {
    /// Start building an event of the given kind.
    pub fn builder(kind: EventKind) -> SimulationEventBuilder {
        SimulationEventBuilder {
            kind,
            time: None,
            priority: PRIORITY_DEFAULT,
            payload: None,
            properties: HashMap::new(),
        }
    }

    /// Dispatch discriminator.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Scheduled simulation time, if any.
    pub fn time(&self) -> Option<SimTime> {
        self.time
    }

    /// Whether the event carries an explicit simulation time.
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Tie-break priority; lower sorts first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The unnamed payload value, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// A named property, or `None` if the key was never set.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Total order over events: by time ascending (`None` means "immediate" and
/// sorts first), then by priority ascending, else equal.
///
/// The calendar extends this with a per-insertion sequence number, so fully
/// equal events leave the calendar in FIFO order.
pub fn event_order(a: &SimulationEvent, b: &SimulationEvent) -> Ordering {
    match a.time.cmp(&b.time) {
        Ordering::Equal => a.priority.cmp(&b.priority),
        ord => ord,
    }
}

/// Builder for [`SimulationEvent`].
#[derive(Debug, Clone)]
pub struct SimulationEventBuilder {
    kind: EventKind,
    time: Option<SimTime>,
    priority: i32,
    payload: Option<Value>,
    properties: HashMap<String, Value>,
}

impl SimulationEventBuilder {
    /// Schedule the event at an explicit simulation time.
    pub fn time(mut self, time: SimTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Override the default priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach the unnamed payload value.
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach a named property.
    pub fn property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Finish the event.
    pub fn build(self) -> SimulationEvent {
        SimulationEvent {
            kind: self.kind,
            time: self.time,
            priority: self.priority,
            payload: self.payload,
            properties: self.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let event = SimulationEvent::builder(EventKind::EndSimulation).build();

        assert_eq!(event.kind(), &EventKind::EndSimulation);
        assert_eq!(event.time(), None);
        assert!(!event.has_time());
        assert_eq!(event.priority(), PRIORITY_DEFAULT);
        assert_eq!(event.payload(), None);
        assert_eq!(event.property("anything"), None);
    }

    #[test]
    fn test_builder_full() {
        let event = SimulationEvent::builder(EventKind::custom("complete-task"))
            .time(250)
            .priority(PRIORITY_SYSTEM)
            .payload(json!(7))
            .property("task_id", json!("t-1"))
            .build();

        assert_eq!(event.time(), Some(250));
        assert_eq!(event.priority(), -1);
        assert_eq!(event.payload(), Some(&json!(7)));
        assert_eq!(event.property("task_id"), Some(&json!("t-1")));
        assert_eq!(event.property("missing"), None);
    }

    #[test]
    fn test_order_by_time() {
        let early = SimulationEvent::builder(EventKind::custom("a")).time(10).build();
        let late = SimulationEvent::builder(EventKind::custom("b")).time(20).build();

        assert_eq!(event_order(&early, &late), Ordering::Less);
        assert_eq!(event_order(&late, &early), Ordering::Greater);
    }

    #[test]
    fn test_order_priority_breaks_time_tie() {
        let system = SimulationEvent::builder(EventKind::BreakSimulation)
            .time(10)
            .priority(PRIORITY_SYSTEM)
            .build();
        let user = SimulationEvent::builder(EventKind::custom("a")).time(10).build();

        assert_eq!(event_order(&system, &user), Ordering::Less);
    }

    #[test]
    fn test_order_untimed_sorts_first() {
        let immediate = SimulationEvent::builder(EventKind::custom("now")).build();
        let timed = SimulationEvent::builder(EventKind::custom("later")).time(0).build();

        assert_eq!(event_order(&immediate, &timed), Ordering::Less);
    }

    #[test]
    fn test_order_fully_equal() {
        let a = SimulationEvent::builder(EventKind::custom("a")).time(10).build();
        let b = SimulationEvent::builder(EventKind::custom("b")).time(10).build();

        assert_eq!(event_order(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::BreakSimulation.to_string(), "break_simulation");
        assert_eq!(EventKind::custom("A").to_string(), "A");
    }
}
