//! Simulation runs
//!
//! A run is the stateful driver that consumes an event calendar against a
//! process engine's logical clock until a termination condition holds.
//! Runs progress through a strict state machine:
//!
//! ```text
//! Created --init()--> Initialized --step()/run_*()--> Running --close()--> Closed
//! ```
//!
//! Two strategies are provided:
//! - [`SimpleSimulationRun`]: bounded what-if scenario run; owns and
//!   ultimately closes its engine, optionally stops at a due date
//! - [`ReplaySimulationRun`]: continuous replay against a live engine it
//!   does not own and never self-terminates
//!
//! See `driver.rs` for the shared state machine.

mod driver;
mod replay;
mod simple;

pub use replay::ReplaySimulationRun;
pub use simple::{SimpleSimulationRun, SimpleSimulationRunBuilder};

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::context::{ProcessEngine, SimulationContext};
use crate::core::clock::SimTime;
use crate::handler::HandlerError;
use crate::models::event::EventKind;

/// Lifecycle state of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, not yet initialized.
    Created,
    /// Context established, handlers initialized.
    Initialized,
    /// At least one step taken.
    Running,
    /// Closed; terminal.
    Closed,
}

/// What a single [`SimulationDebugger::step`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An event was removed and dispatched (or dropped for lack of a
    /// handler).
    Dispatched,
    /// The run's termination condition held; nothing was dispatched.
    Ended,
}

/// Failures surfaced by simulation runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Calendar invariant violation (event scheduled in the past).
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// A handler failed during run initialization.
    #[error("simulation run initialization failed")]
    Init(#[source] HandlerError),

    /// A handler failed while processing a dispatched event.
    #[error("handler for {kind} event failed")]
    Dispatch {
        kind: EventKind,
        source: HandlerError,
    },

    /// An operation was invoked in a state that does not permit it, e.g.
    /// stepping before `init` or closing twice.
    #[error("{operation} is not allowed in run state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: RunState,
    },

    /// A declared but unimplemented feature was requested.
    #[error("{0} are not supported")]
    Unsupported(&'static str),
}

/// Step-wise, continuous, or bounded control over a simulation run.
pub trait SimulationDebugger<E: ProcessEngine> {
    /// Initialize the run: register strategy handlers and call `init` on
    /// every handler. Must be called before any stepping.
    fn init(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError>;

    /// Consume and dispatch the single minimal pending event.
    fn step(&mut self, ctx: &mut SimulationContext<E>) -> Result<StepOutcome, SimulationError>;

    /// Consume and dispatch events until the termination condition holds.
    fn run_continue(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError>;

    /// Run up to (not past) the given simulation time, by injecting a
    /// system-priority break event at that time and continuing.
    fn run_to_time(
        &mut self,
        ctx: &mut SimulationContext<E>,
        time: SimTime,
    ) -> Result<(), SimulationError>;

    /// Step until the next pending event matches `kind`, leaving that
    /// event unconsumed in the calendar.
    fn run_to_event(
        &mut self,
        ctx: &mut SimulationContext<E>,
        kind: &EventKind,
    ) -> Result<(), SimulationError>;

    /// Terminate the run and release its resources. Closing twice is an
    /// [`SimulationError::InvalidState`] error.
    fn close(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError>;
}

/// Single-shot convenience: `init` + `run_continue` + `close`.
pub trait SimulationRun<E: ProcessEngine> {
    /// Drive the whole run in one call.
    fn execute(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError>;
}
