//! Bounded scenario run
//!
//! The workhorse for what-if scenarios: consume a pre-seeded calendar
//! against an engine the run owns, stop when the calendar runs dry, a break
//! is injected, or the optional due date is passed, then close the engine.

use crate::context::{ProcessEngine, SimulationContext};
use crate::core::clock::SimTime;
use crate::handler::{
    AcquireJobsEventHandler, HandlerMap, JobExecutor, NoopEventHandler, SimulationEventHandler,
};
use crate::models::event::{EventKind, SimulationEvent};
use crate::run::driver::RunDriver;
use crate::run::{RunState, SimulationDebugger, SimulationError, SimulationRun, StepOutcome};

/// Bounded simulation run that owns (and on close, closes) its engine.
///
/// # Example
///
/// ```
/// use process_simulator_core_rs::{
///     BasicProcessEngine, EventCalendar, EventKind, SimulationContext,
///     SimulationEvent, SimpleSimulationRun, SimulationRun,
/// };
///
/// let mut ctx = SimulationContext::new(BasicProcessEngine::new("what-if"));
/// ctx.calendar_mut()
///     .add_event(SimulationEvent::builder(EventKind::EndSimulation).time(100).build());
///
/// let mut run = SimpleSimulationRun::builder().build();
/// run.execute(&mut ctx).unwrap();
/// assert!(ctx.engine().is_closed());
/// ```
pub struct SimpleSimulationRun<E: ProcessEngine> {
    driver: RunDriver<E>,
    due_date: Option<SimTime>,
}

impl<E: ProcessEngine> SimpleSimulationRun<E> {
    /// Start building a run.
    pub fn builder() -> SimpleSimulationRunBuilder<E> {
        SimpleSimulationRunBuilder {
            handlers: HandlerMap::new(),
            due_date: None,
            job_executor: None,
        }
    }

    /// Lifecycle state of this run.
    pub fn state(&self) -> RunState {
        self.driver.state()
    }

    // The bound compares the candidate event's own time against the due
    // date: an event past the bound must not be dispatched even though the
    // clock only advances on dispatch.
    fn past_due(due_date: Option<SimTime>, event: &SimulationEvent) -> bool {
        match (due_date, event.time()) {
            (Some(due), Some(time)) => time > due,
            _ => false,
        }
    }
}

impl<E: ProcessEngine> SimulationDebugger<E> for SimpleSimulationRun<E> {
    fn init(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.driver.init(ctx)
    }

    fn step(&mut self, ctx: &mut SimulationContext<E>) -> Result<StepOutcome, SimulationError> {
        let due = self.due_date;
        self.driver.step(ctx, move |_, event| Self::past_due(due, event))
    }

    fn run_continue(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        let due = self.due_date;
        self.driver
            .run_continue(ctx, move |_, event| Self::past_due(due, event))
    }

    fn run_to_time(
        &mut self,
        ctx: &mut SimulationContext<E>,
        time: SimTime,
    ) -> Result<(), SimulationError> {
        let due = self.due_date;
        self.driver
            .run_to_time(ctx, time, move |_, event| Self::past_due(due, event))
    }

    fn run_to_event(
        &mut self,
        ctx: &mut SimulationContext<E>,
        kind: &EventKind,
    ) -> Result<(), SimulationError> {
        let due = self.due_date;
        self.driver
            .run_to_event(ctx, kind, move |_, event| Self::past_due(due, event))
    }

    fn close(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.driver.close(ctx)?;
        ctx.engine_mut().close();
        Ok(())
    }
}

impl<E: ProcessEngine> SimulationRun<E> for SimpleSimulationRun<E> {
    fn execute(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.init(ctx)?;
        self.run_continue(ctx)?;
        self.close(ctx)
    }
}

/// Builder for [`SimpleSimulationRun`].
pub struct SimpleSimulationRunBuilder<E: ProcessEngine> {
    handlers: HandlerMap<E>,
    due_date: Option<SimTime>,
    job_executor: Option<Box<dyn JobExecutor<E>>>,
}

impl<E: ProcessEngine + 'static> SimpleSimulationRunBuilder<E> {
    /// Register a handler for an event kind, replacing any previous one.
    pub fn handler(
        mut self,
        kind: EventKind,
        handler: Box<dyn SimulationEventHandler<E>>,
    ) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Bound the run: events scheduled strictly after `time` end it.
    pub fn due_date(mut self, time: SimTime) -> Self {
        self.due_date = Some(time);
        self
    }

    /// Supply the engine's job-execution component; registers the
    /// job-acquisition notification handler.
    pub fn job_executor(mut self, executor: Box<dyn JobExecutor<E>>) -> Self {
        self.job_executor = Some(executor);
        self
    }

    /// Finish the run.
    pub fn build(self) -> SimpleSimulationRun<E> {
        let mut handlers = self.handlers;
        handlers
            .entry(EventKind::EndSimulation)
            .or_insert_with(|| Box::new(NoopEventHandler));
        if let Some(executor) = self.job_executor {
            handlers.insert(
                EventKind::AcquireJobNotification,
                Box::new(AcquireJobsEventHandler::new(executor)),
            );
        }
        SimpleSimulationRun {
            driver: RunDriver::new(handlers),
            due_date: self.due_date,
        }
    }
}

impl<E: ProcessEngine> Default for SimpleSimulationRunBuilder<E> {
    fn default() -> Self {
        SimpleSimulationRun::builder()
    }
}
