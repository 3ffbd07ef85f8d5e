//! Scenario seeding
//!
//! A scenario is the data-driven description of what a simulation should
//! replay: event templates paired with schedules, typically deserialized
//! from a configuration file, expanded into concrete events and seeded into
//! a calendar before the run starts.
//!
//! Repeating schedules are part of the data model but not yet executable:
//! expanding one is a hard [`SimulationError::Unsupported`] failure rather
//! than a silent skip, so a scenario never half-runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calendar::EventCalendar;
use crate::core::clock::SimTime;
use crate::models::event::{EventKind, SimulationEvent, PRIORITY_DEFAULT};
use crate::run::SimulationError;

/// Event template: everything but the time, which the schedule supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Kind the expanded events will carry.
    pub kind: EventKind,

    /// Tie-break priority for the expanded events.
    #[serde(default)]
    pub priority: i32,

    /// Unnamed payload value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Named payload values.
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl EventSpec {
    /// Template with default priority and no payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            priority: PRIORITY_DEFAULT,
            payload: None,
            properties: HashMap::new(),
        }
    }

    fn to_event(&self, time: SimTime) -> SimulationEvent {
        let mut builder = SimulationEvent::builder(self.kind.clone())
            .time(time)
            .priority(self.priority);
        if let Some(payload) = &self.payload {
            builder = builder.payload(payload.clone());
        }
        for (name, value) in &self.properties {
            builder = builder.property(name.clone(), value.clone());
        }
        builder.build()
    }
}

/// When the scheduled event occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventSchedule {
    /// Occurs once at a specific simulation time.
    OneTime { time: SimTime },

    /// Occurs `count` times starting at `start`, `interval` apart.
    /// Declared for scenario files, not yet executable.
    Repeating {
        start: SimTime,
        interval: SimTime,
        count: u32,
    },
}

/// An event template paired with its schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub spec: EventSpec,
    pub schedule: EventSchedule,
}

/// A predetermined collection of scheduled events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub events: Vec<ScheduledEvent>,
}

impl SimulationScenario {
    /// Scenario over the given scheduled events.
    pub fn new(events: Vec<ScheduledEvent>) -> Self {
        Self { events }
    }

    /// Expand every schedule into concrete events.
    pub fn expand(&self) -> Result<Vec<SimulationEvent>, SimulationError> {
        let mut events = Vec::with_capacity(self.events.len());
        for scheduled in &self.events {
            match scheduled.schedule {
                EventSchedule::OneTime { time } => events.push(scheduled.spec.to_event(time)),
                EventSchedule::Repeating { .. } => {
                    return Err(SimulationError::Unsupported("repeating event schedules"))
                }
            }
        }
        Ok(events)
    }

    /// Expand and insert every event into the calendar.
    ///
    /// Returns the number of events seeded.
    pub fn seed_into(&self, calendar: &mut dyn EventCalendar) -> Result<usize, SimulationError> {
        let events = self.expand()?;
        let count = events.len();
        for event in events {
            calendar.add_event(event);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_time_expansion() {
        let scenario = SimulationScenario::new(vec![ScheduledEvent {
            spec: EventSpec::new(EventKind::custom("start-process")),
            schedule: EventSchedule::OneTime { time: 500 },
        }]);

        let events = scenario.expand().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time(), Some(500));
        assert_eq!(events[0].kind(), &EventKind::custom("start-process"));
    }

    #[test]
    fn test_repeating_expansion_is_refused() {
        let scenario = SimulationScenario::new(vec![ScheduledEvent {
            spec: EventSpec::new(EventKind::custom("poll")),
            schedule: EventSchedule::Repeating {
                start: 0,
                interval: 100,
                count: 5,
            },
        }]);

        assert!(matches!(
            scenario.expand(),
            Err(SimulationError::Unsupported(_))
        ));
    }
}
