//! Event calendar
//!
//! The calendar is the priority-ordered store of pending events. Removal
//! always yields the minimal event per [`event_order`], with a FIFO
//! tie-break among fully equal events: every insertion is tagged with a
//! monotonically increasing sequence number that completes the ordering.
//! That tie-break is a contract, not an accident — two runs that insert the
//! same events in the same order dispatch them in the same order.
//!
//! The calendar never advances the clock. It only reads the injected
//! [`ClockReader`] to refuse removing an event scheduled before "now":
//! a handler must never schedule into the past, and hitting this error
//! means the surrounding scenario is misconfigured.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use thiserror::Error;
use tracing::trace;

use crate::core::clock::{ClockReader, SimTime};
use crate::models::event::{event_order, SimulationEvent};

/// Calendar invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The minimal pending event is scheduled strictly before the current
    /// simulation time.
    #[error("event from the past: event time {event_time} is earlier than current time {now}")]
    EventFromPast { event_time: SimTime, now: SimTime },
}

/// Priority-ordered store of pending simulation events.
pub trait EventCalendar {
    /// Whether no events are pending.
    fn is_empty(&self) -> bool;

    /// Number of pending events.
    fn len(&self) -> usize;

    /// The minimal pending event, without removing it.
    fn peek_first(&self) -> Option<&SimulationEvent>;

    /// Remove and return the minimal pending event.
    ///
    /// Fails with [`CalendarError::EventFromPast`] if that event is
    /// scheduled before the clock reader's current time. Returns `Ok(None)`
    /// when the calendar is empty.
    fn remove_first(&mut self) -> Result<Option<SimulationEvent>, CalendarError>;

    /// Insert an event.
    fn add_event(&mut self, event: SimulationEvent);

    /// Discard all pending events.
    fn clear(&mut self);
}

/// Heap entry: the event plus its insertion sequence number.
struct QueuedEvent {
    seq: u64,
    event: SimulationEvent,
}

// BinaryHeap is a max-heap; reverse the comparison so the minimal
// (time, priority, seq) triple surfaces first.
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match event_order(&self.event, &other.event) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

/// Default [`EventCalendar`] backed by a binary heap.
pub struct SimpleEventCalendar {
    clock: Arc<dyn ClockReader>,
    queue: BinaryHeap<QueuedEvent>,
    next_seq: u64,
}

impl SimpleEventCalendar {
    /// Create an empty calendar reading the given clock.
    pub fn new(clock: Arc<dyn ClockReader>) -> Self {
        Self {
            clock,
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create a calendar pre-seeded with a collection of events.
    pub fn with_events(
        clock: Arc<dyn ClockReader>,
        events: impl IntoIterator<Item = SimulationEvent>,
    ) -> Self {
        let mut calendar = Self::new(clock);
        for event in events {
            calendar.add_event(event);
        }
        calendar
    }
}

impl EventCalendar for SimpleEventCalendar {
    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn peek_first(&self) -> Option<&SimulationEvent> {
        self.queue.peek().map(|queued| &queued.event)
    }

    fn remove_first(&mut self) -> Result<Option<SimulationEvent>, CalendarError> {
        if let Some(first) = self.queue.peek() {
            let now = self.clock.current_time();
            if let Some(event_time) = first.event.time() {
                if event_time < now {
                    return Err(CalendarError::EventFromPast { event_time, now });
                }
            }
        }
        Ok(self.queue.pop().map(|queued| queued.event))
    }

    fn add_event(&mut self, event: SimulationEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(kind = %event.kind(), time = ?event.time(), seq, "event scheduled");
        self.queue.push(QueuedEvent { seq, event });
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}
