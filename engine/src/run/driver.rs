//! Shared run state machine
//!
//! Both run strategies drive the same loop: remove the minimal event,
//! decide whether it ends the run, otherwise advance the engine clock to
//! the event's time and dispatch it. Strategies differ only in their extra
//! termination predicate and in what `close` releases, so the machinery
//! lives here once.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::EventCalendar;
use crate::context::{ProcessEngine, SimulationContext};
use crate::core::clock::SimTime;
use crate::handler::{HandlerMap, SimulationEventHandler};
use crate::models::event::{EventKind, SimulationEvent, PRIORITY_SYSTEM};
use crate::run::{RunState, SimulationError, StepOutcome};

/// The state machine shared by both run strategies.
///
/// The driver itself ends a run on calendar exhaustion and on the
/// `BreakSimulation` sentinel (so `run_to_time` bounds every strategy);
/// the strategy's predicate adds its own conditions on top.
pub(crate) struct RunDriver<E: ProcessEngine> {
    run_id: Uuid,
    handlers: HandlerMap<E>,
    state: RunState,
}

impl<E: ProcessEngine> RunDriver<E> {
    pub(crate) fn new(handlers: HandlerMap<E>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            handlers,
            state: RunState::Created,
        }
    }

    pub(crate) fn state(&self) -> RunState {
        self.state
    }

    pub(crate) fn init(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.guard("init", &[RunState::Created])?;
        info!(
            run_id = %self.run_id,
            engine = ctx.engine().name(),
            pending = ctx.calendar().len(),
            "initializing simulation run"
        );
        for handler in self.handlers.values_mut() {
            handler.init(ctx).map_err(SimulationError::Init)?;
        }
        self.state = RunState::Initialized;
        Ok(())
    }

    pub(crate) fn step<F>(
        &mut self,
        ctx: &mut SimulationContext<E>,
        end: F,
    ) -> Result<StepOutcome, SimulationError>
    where
        F: Fn(&SimulationContext<E>, &SimulationEvent) -> bool,
    {
        self.guard("step", &[RunState::Initialized, RunState::Running])?;
        self.state = RunState::Running;

        let event = match ctx.calendar_mut().remove_first()? {
            Some(event) => event,
            None => {
                info!(run_id = %self.run_id, "event calendar exhausted, run complete");
                return Ok(StepOutcome::Ended);
            }
        };

        if *event.kind() == EventKind::BreakSimulation || end(ctx, &event) {
            info!(
                run_id = %self.run_id,
                kind = %event.kind(),
                time = ?event.time(),
                "run reached its end condition"
            );
            return Ok(StepOutcome::Ended);
        }

        // Clock coupling: the engine's "now" tracks the event stream.
        if let Some(time) = event.time() {
            ctx.clock().set_time(time);
        }

        match self.handlers.get_mut(event.kind()) {
            Some(handler) => {
                debug!(
                    run_id = %self.run_id,
                    kind = %event.kind(),
                    time = ?event.time(),
                    "dispatching event"
                );
                handler
                    .handle(ctx, &event)
                    .map_err(|source| SimulationError::Dispatch {
                        kind: event.kind().clone(),
                        source,
                    })?;
            }
            None => {
                warn!(
                    run_id = %self.run_id,
                    kind = %event.kind(),
                    "no handler registered for event, dropping it"
                );
            }
        }

        Ok(StepOutcome::Dispatched)
    }

    pub(crate) fn run_continue<F>(
        &mut self,
        ctx: &mut SimulationContext<E>,
        end: F,
    ) -> Result<(), SimulationError>
    where
        F: Fn(&SimulationContext<E>, &SimulationEvent) -> bool,
    {
        while self.step(ctx, &end)? == StepOutcome::Dispatched {}
        Ok(())
    }

    pub(crate) fn run_to_time<F>(
        &mut self,
        ctx: &mut SimulationContext<E>,
        time: SimTime,
        end: F,
    ) -> Result<(), SimulationError>
    where
        F: Fn(&SimulationContext<E>, &SimulationEvent) -> bool,
    {
        // System priority makes the break win against every other event
        // scheduled at the same instant.
        ctx.calendar_mut().add_event(
            SimulationEvent::builder(EventKind::BreakSimulation)
                .time(time)
                .priority(PRIORITY_SYSTEM)
                .build(),
        );
        self.run_continue(ctx, end)
    }

    pub(crate) fn run_to_event<F>(
        &mut self,
        ctx: &mut SimulationContext<E>,
        kind: &EventKind,
        end: F,
    ) -> Result<(), SimulationError>
    where
        F: Fn(&SimulationContext<E>, &SimulationEvent) -> bool,
    {
        loop {
            match ctx.calendar().peek_first() {
                None => return Ok(()),
                Some(next) if next.kind() == kind => return Ok(()),
                Some(_) => {}
            }
            if self.step(ctx, &end)? == StepOutcome::Ended {
                return Ok(());
            }
        }
    }

    pub(crate) fn close(&mut self, ctx: &mut SimulationContext<E>) -> Result<(), SimulationError> {
        self.guard("close", &[RunState::Initialized, RunState::Running])?;
        ctx.calendar_mut().clear();
        self.state = RunState::Closed;
        info!(run_id = %self.run_id, "simulation run closed");
        Ok(())
    }

    fn guard(
        &self,
        operation: &'static str,
        allowed: &[RunState],
    ) -> Result<(), SimulationError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SimulationError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
