//! Event handlers
//!
//! Handlers carry the engine-specific side effects of a simulation: the run
//! driver removes events from the calendar and dispatches each one to the
//! handler registered for its kind. A kind with no registered handler is
//! not an error — the driver logs a warning and drops the event, so sparse
//! handler maps are a supported way to run a scenario.

use std::collections::HashMap;
use std::error::Error;

use crate::context::{ProcessEngine, SimulationContext};
use crate::models::event::{EventKind, SimulationEvent};

/// Error type handlers report; the run driver wraps it into
/// [`SimulationError`](crate::run::SimulationError).
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Result of a handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Handler registration map supplied at run construction.
pub type HandlerMap<E> = HashMap<EventKind, Box<dyn SimulationEventHandler<E>>>;

/// Reaction to one kind of simulation event.
pub trait SimulationEventHandler<E: ProcessEngine> {
    /// Called once per handler when the run initializes.
    fn init(&mut self, _ctx: &mut SimulationContext<E>) -> HandlerResult {
        Ok(())
    }

    /// Called once per dispatched event of this handler's registered kind.
    fn handle(&mut self, ctx: &mut SimulationContext<E>, event: &SimulationEvent) -> HandlerResult;
}

/// Handler that ignores its event.
///
/// The scenario run registers this for
/// [`EventKind::EndSimulation`](crate::models::event::EventKind), so a
/// scenario's end marker terminates the run cleanly without reaching any
/// scenario handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventHandler;

impl<E: ProcessEngine> SimulationEventHandler<E> for NoopEventHandler {
    fn handle(
        &mut self,
        _ctx: &mut SimulationContext<E>,
        _event: &SimulationEvent,
    ) -> HandlerResult {
        Ok(())
    }
}

/// Job-execution component of the simulated engine.
///
/// Supplied by the embedder when the scenario involves asynchronous jobs
/// (timers, async continuations); invoked whenever a job-acquisition
/// notification event is dispatched.
pub trait JobExecutor<E: ProcessEngine> {
    /// Acquire and execute the jobs currently due on the engine.
    fn acquire_jobs(&mut self, ctx: &mut SimulationContext<E>) -> HandlerResult;
}

/// Bridges [`EventKind::AcquireJobNotification`](crate::models::event::EventKind)
/// events to the supplied [`JobExecutor`].
pub struct AcquireJobsEventHandler<E: ProcessEngine> {
    executor: Box<dyn JobExecutor<E>>,
}

impl<E: ProcessEngine> AcquireJobsEventHandler<E> {
    /// Wrap a job executor.
    pub fn new(executor: Box<dyn JobExecutor<E>>) -> Self {
        Self { executor }
    }
}

impl<E: ProcessEngine> SimulationEventHandler<E> for AcquireJobsEventHandler<E> {
    fn handle(
        &mut self,
        ctx: &mut SimulationContext<E>,
        _event: &SimulationEvent,
    ) -> HandlerResult {
        self.executor.acquire_jobs(ctx)
    }
}
