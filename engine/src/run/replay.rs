//! Replay run
//!
//! Drives recorded or live-fed events against an engine the embedder keeps
//! owning. The strategy never terminates on its own account — only calendar
//! exhaustion or an injected break stops it — and `close` leaves the engine
//! untouched so the embedder can keep using it afterwards.

use crate::context::{ProcessEngine, SimulationContext};
use crate::core::clock::SimTime;
use crate::handler::HandlerMap;
use crate::models::event::{EventKind, SimulationEvent};
use crate::run::driver::RunDriver;
use crate::run::{RunState, SimulationDebugger, SimulationError, SimulationRun, StepOutcome};

/// Continuous replay run against a live engine it does not own.
pub struct ReplaySimulationRun<E: ProcessEngine> {
    driver: RunDriver<E>,
}

impl<E: ProcessEngine> ReplaySimulationRun<E> {
    /// Create a replay run dispatching to the given handlers.
    pub fn new(handlers: HandlerMap<E>) -> Self {
        Self {
            driver: RunDriver::new(handlers),
        }
    }

    /// Lifecycle state of this run.
    pub fn state(&self) -> RunState {
        self.driver.state()
    }

    // Replay never self-terminates; the driver-level conditions (empty
    // calendar, break sentinel) are the only way it stops.
    fn never_ends(_ctx: &SimulationContext<E>, _event: &SimulationEvent) -> bool {
        false
    }
}

impl<E: ProcessEngine> SimulationDebugger<E> for ReplaySimulationRun<E> {
    fn init(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.driver.init(ctx)
    }

    fn step(&mut self, ctx: &mut SimulationContext<E>) -> Result<StepOutcome, SimulationError> {
        self.driver.step(ctx, Self::never_ends)
    }

    fn run_continue(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.driver.run_continue(ctx, Self::never_ends)
    }

    fn run_to_time(
        &mut self,
        ctx: &mut SimulationContext<E>,
        time: SimTime,
    ) -> Result<(), SimulationError> {
        self.driver.run_to_time(ctx, time, Self::never_ends)
    }

    fn run_to_event(
        &mut self,
        ctx: &mut SimulationContext<E>,
        kind: &EventKind,
    ) -> Result<(), SimulationError> {
        self.driver.run_to_event(ctx, kind, Self::never_ends)
    }

    fn close(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        // Not ours to close: the engine stays open for the embedder.
        self.driver.close(ctx)
    }
}

impl<E: ProcessEngine> SimulationRun<E> for ReplaySimulationRun<E> {
    fn execute(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.init(ctx)?;
        self.run_continue(ctx)?;
        self.close(ctx)
    }
}
