//! Logical clock for the simulation
//!
//! The simulation does not run against wall-clock time. "Now" is a settable
//! virtual clock owned by the process engine; the run driver advances it to
//! each dispatched event's simulation time, and the event calendar reads it
//! to reject events scheduled in the past.
//!
//! # Example
//! ```
//! use process_simulator_core_rs::VirtualClock;
//!
//! let clock = VirtualClock::new(0);
//! assert_eq!(clock.current_time(), 0);
//!
//! clock.set_time(1_000);
//! assert_eq!(clock.current_time(), 1_000);
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

/// Simulation time in milliseconds since the scenario origin.
pub type SimTime = i64;

/// Read-only view of the current simulation time.
///
/// The calendar depends on this rather than on [`VirtualClock`] directly, so
/// tests and embedders can inject a fixed or derived clock.
pub trait ClockReader: Send + Sync {
    /// Current simulation time.
    fn current_time(&self) -> SimTime;
}

/// Settable logical clock.
///
/// Interior-mutable so a shared `Arc<VirtualClock>` can be read by the
/// calendar while the run driver writes to it. The clock itself never
/// validates movement; the calendar's past-event guard is the enforcement
/// point for time ordering.
#[derive(Debug)]
pub struct VirtualClock {
    now: AtomicI64,
}

impl VirtualClock {
    /// Create a clock positioned at `start`.
    pub fn new(start: SimTime) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    /// Current simulation time.
    pub fn current_time(&self) -> SimTime {
        self.now.load(Ordering::SeqCst)
    }

    /// Move the clock to `time`.
    pub fn set_time(&self, time: SimTime) {
        self.now.store(time, Ordering::SeqCst);
    }

    /// Move the clock back to the scenario origin.
    pub fn reset(&self) {
        self.set_time(0);
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ClockReader for VirtualClock {
    fn current_time(&self) -> SimTime {
        VirtualClock::current_time(self)
    }
}
