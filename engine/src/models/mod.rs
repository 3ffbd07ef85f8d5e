//! Domain value types
//!
//! See `event.rs` for the simulation event model.

pub mod event;

pub use event::{
    event_order, EventKind, SimulationEvent, SimulationEventBuilder, PRIORITY_DEFAULT,
    PRIORITY_SYSTEM,
};
