//! Process Simulator Core - Rust Engine
//!
//! Discrete-event simulation engine for process engines with a settable
//! logical clock: a priority-ordered event calendar, pluggable event
//! handlers, and a run state machine supporting step-wise, continuous, and
//! bounded execution.
//!
//! # Architecture
//!
//! - **core**: simulation time and the virtual clock
//! - **models**: the immutable simulation event and its ordering
//! - **calendar**: the priority-ordered pending-event store
//! - **context**: explicit run context binding engine, calendar, execution
//! - **handler**: the event-handler contract and built-in handlers
//! - **run**: the run state machine and its two strategies
//! - **scenario**: data-driven calendar seeding
//!
//! # Critical Invariants
//!
//! 1. Events dispatch in non-decreasing `(time, priority)` order, FIFO
//!    among ties
//! 2. An event is never executed before the engine clock's current time
//! 3. The engine clock is advanced to each dispatched event's time
//! 4. No ambient state: every operation takes its context explicitly

// Module declarations
pub mod calendar;
pub mod context;
pub mod core;
pub mod handler;
pub mod models;
pub mod run;
pub mod scenario;

// Re-exports for convenience
pub use calendar::{CalendarError, EventCalendar, SimpleEventCalendar};
pub use context::{BasicProcessEngine, ExecutionScope, ProcessEngine, SimulationContext};
pub use crate::core::clock::{ClockReader, SimTime, VirtualClock};
pub use handler::{
    AcquireJobsEventHandler, HandlerError, HandlerMap, HandlerResult, JobExecutor,
    NoopEventHandler, SimulationEventHandler,
};
pub use models::event::{
    event_order, EventKind, SimulationEvent, SimulationEventBuilder, PRIORITY_DEFAULT,
    PRIORITY_SYSTEM,
};
pub use run::{
    ReplaySimulationRun, RunState, SimpleSimulationRun, SimpleSimulationRunBuilder,
    SimulationDebugger, SimulationError, SimulationRun, StepOutcome,
};
pub use scenario::{EventSchedule, EventSpec, ScheduledEvent, SimulationScenario};
