//! The tracking transition function.
//!
//! `TrackingMachine` is the pure decision point: given a snapshot of a
//! shipment's history and operator input, it either produces the event to
//! persist or a typed `TransitionError`. Rules:
//!
//! - unknown status labels and blank messages are rejected first;
//! - a closed shipment (its current event is final) rejects new events;
//! - otherwise any canonical status may follow any other;
//! - corrections overwrite an existing event in place, bypass the lock,
//!   and never re-open the shipment.

mod candidate;
mod transition;

pub use candidate::{Correction, UpdateCandidate};
pub use transition::{TrackingMachine, TransitionError};
