//! Core tracking state machine types and logic.
//!
//! This module contains the pure functional core:
//! - The canonical status vocabulary via the `State` trait
//! - Guard predicates for transition control
//! - Immutable, append-only tracking history
//! - Display progress derivation
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod guard;
mod history;
mod ids;
mod progress;
mod state;

pub use guard::Guard;
pub use history::{TrackingHistory, TrackingUpdate};
pub use ids::{ShipmentId, TrackingUpdateId, UserId};
pub use progress::{progress_percent, progress_percent_for_label, DISPLAY_SEQUENCE, MIN_PROGRESS};
pub use state::{State, TrackingStatus};
