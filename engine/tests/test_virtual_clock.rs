//! Tests for the virtual clock and its sharing semantics.

use std::sync::Arc;

use process_simulator_core_rs::{BasicProcessEngine, ClockReader, ProcessEngine, VirtualClock};

#[test]
fn test_new_clock_reads_start() {
    let clock = VirtualClock::new(500);
    assert_eq!(clock.current_time(), 500);
}

#[test]
fn test_set_time_moves_clock() {
    let clock = VirtualClock::new(0);

    clock.set_time(10);
    assert_eq!(clock.current_time(), 10);

    // Moving backwards is the calendar's concern, not the clock's.
    clock.set_time(3);
    assert_eq!(clock.current_time(), 3);
}

#[test]
fn test_reset_returns_to_origin() {
    let clock = VirtualClock::new(123);
    clock.reset();
    assert_eq!(clock.current_time(), 0);
}

#[test]
fn test_reader_view_tracks_writes() {
    let clock = Arc::new(VirtualClock::new(0));
    let reader: Arc<dyn ClockReader> = clock.clone();

    clock.set_time(77);
    assert_eq!(reader.current_time(), 77);
}

#[test]
fn test_engine_clock_is_shared_not_copied() {
    let engine = BasicProcessEngine::new("shared");
    let handle = engine.clock().clone();

    handle.set_time(42);
    assert_eq!(engine.clock().current_time(), 42);
}
