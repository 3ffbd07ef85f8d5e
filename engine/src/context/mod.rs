//! Simulation context
//!
//! A run is always driven against a [`SimulationContext`]: the process
//! engine being simulated, the event calendar feeding the run, and the
//! execution scope (variable container) the run operates on. The context is
//! an explicit value passed `&mut` into every run operation — there is no
//! ambient per-thread state, so nested or concurrent runs each simply own
//! their own context.
//!
//! The engine behind the context is opaque to this crate. Embedders adapt
//! their engine behind [`ProcessEngine`], whose only hard requirement is a
//! settable [`VirtualClock`]; handlers written for a concrete engine type
//! reach its full API through [`SimulationContext::engine_mut`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::calendar::{EventCalendar, SimpleEventCalendar};
use crate::core::clock::{ClockReader, SimTime, VirtualClock};

/// Contract the simulated process engine must satisfy.
///
/// The clock is the coupling point: the run driver sets it to each
/// dispatched event's simulation time, so the engine's notion of "now"
/// tracks the discrete event stream.
pub trait ProcessEngine {
    /// Engine name, used in diagnostics.
    fn name(&self) -> &str {
        "process-engine"
    }

    /// The engine's settable logical clock.
    fn clock(&self) -> &Arc<VirtualClock>;

    /// Release engine resources. Called only by runs that own their engine.
    fn close(&mut self) {}
}

/// Minimal [`ProcessEngine`]: a named clock holder.
///
/// Sufficient for scenarios whose handlers keep their state elsewhere, and
/// for tests. Embedders with a real engine implement [`ProcessEngine`] on
/// their own type instead.
#[derive(Debug)]
pub struct BasicProcessEngine {
    name: String,
    clock: Arc<VirtualClock>,
    closed: bool,
}

impl BasicProcessEngine {
    /// Create an engine with its clock at the scenario origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock: Arc::new(VirtualClock::new(0)),
            closed: false,
        }
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ProcessEngine for BasicProcessEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn clock(&self) -> &Arc<VirtualClock> {
        &self.clock
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// The scope (variable container) a run is driving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionScope {
    id: String,
    variables: HashMap<String, Value>,
}

impl ExecutionScope {
    /// Create an empty scope with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            variables: HashMap::new(),
        }
    }

    /// Scope identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A scope variable, or `None` if unset.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Set a scope variable, replacing any previous value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }
}

/// Everything a simulation run operates on: engine, calendar, execution.
pub struct SimulationContext<E: ProcessEngine> {
    engine: E,
    calendar: Box<dyn EventCalendar>,
    execution: Option<ExecutionScope>,
}

impl<E: ProcessEngine> SimulationContext<E> {
    /// Wrap an engine with a fresh calendar reading the engine's clock.
    pub fn new(engine: E) -> Self {
        let clock: Arc<dyn ClockReader> = engine.clock().clone();
        Self {
            calendar: Box::new(SimpleEventCalendar::new(clock)),
            engine,
            execution: None,
        }
    }

    /// Wrap an engine together with a pre-built (typically pre-seeded)
    /// calendar.
    pub fn with_calendar(engine: E, calendar: Box<dyn EventCalendar>) -> Self {
        Self {
            engine,
            calendar,
            execution: None,
        }
    }

    /// The process engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The process engine, mutably. Handlers use this to reach the full
    /// API of the concrete engine type they were written for.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The event calendar.
    pub fn calendar(&self) -> &dyn EventCalendar {
        self.calendar.as_ref()
    }

    /// The event calendar, mutably.
    pub fn calendar_mut(&mut self) -> &mut dyn EventCalendar {
        self.calendar.as_mut()
    }

    /// The execution scope the run is driving, if one was associated.
    pub fn execution(&self) -> Option<&ExecutionScope> {
        self.execution.as_ref()
    }

    /// The execution scope, mutably.
    pub fn execution_mut(&mut self) -> Option<&mut ExecutionScope> {
        self.execution.as_mut()
    }

    /// Associate the execution scope the run is driving.
    pub fn set_execution(&mut self, scope: ExecutionScope) {
        self.execution = Some(scope);
    }

    /// The engine's logical clock.
    pub fn clock(&self) -> &Arc<VirtualClock> {
        self.engine.clock()
    }

    /// Current simulation time.
    pub fn current_time(&self) -> SimTime {
        self.engine.clock().current_time()
    }

    /// Dissolve the context and hand the engine back.
    ///
    /// Used after a non-owning run closes, when the embedder keeps driving
    /// the engine itself.
    pub fn into_engine(self) -> E {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execution_scope_variables() {
        let mut scope = ExecutionScope::new("order-4711");
        assert_eq!(scope.id(), "order-4711");
        assert_eq!(scope.variable("total"), None);

        scope.set_variable("total", json!(99));
        assert_eq!(scope.variable("total"), Some(&json!(99)));

        scope.set_variable("total", json!(100));
        assert_eq!(scope.variable("total"), Some(&json!(100)));
    }

    #[test]
    fn test_context_wires_calendar_to_engine_clock() {
        let mut ctx = SimulationContext::new(BasicProcessEngine::new("test"));
        assert!(ctx.calendar().is_empty());

        ctx.clock().set_time(25);
        assert_eq!(ctx.current_time(), 25);
    }

    #[test]
    fn test_into_engine_returns_engine() {
        let ctx = SimulationContext::new(BasicProcessEngine::new("mine"));
        let engine = ctx.into_engine();
        assert_eq!(engine.name(), "mine");
        assert!(!engine.is_closed());
    }
}
