//! Waybill: shipment tracking as a pure state machine
//!
//! Waybill follows Stillwater's "pure core, imperative shell" philosophy.
//! Deciding whether a tracking update is accepted is a pure function of a
//! shipment's history and the operator's input; persistence and
//! notifications are isolated in effects that run against an explicit
//! environment.
//!
//! # Core Concepts
//!
//! - **Status**: the canonical tracking vocabulary, with terminal statuses
//!   that close a shipment
//! - **History**: an append-only event log; current status and display
//!   progress are always derived from it
//! - **Machine**: accepts or rejects updates and corrections
//! - **Store**: the persistence boundary, with optimistic appends
//!
//! # Example
//!
//! ```rust
//! use waybill::core::{ShipmentId, TrackingHistory, TrackingStatus};
//! use waybill::machine::{TrackingMachine, TransitionError, UpdateCandidate};
//!
//! let machine = TrackingMachine::new();
//! let history = TrackingHistory::new(ShipmentId::new());
//! assert_eq!(history.current_status(), TrackingStatus::Pending);
//!
//! let delivered = machine
//!     .apply(&history, &UpdateCandidate::new("delivered", "Signed for"))
//!     .unwrap();
//! let history = history.record(delivered);
//!
//! let late_scan = machine.apply(&history, &UpdateCandidate::new("in_transit", "Late scan"));
//! assert!(matches!(late_scan, Err(TransitionError::ShipmentClosed { .. })));
//! ```

pub mod config;
pub mod core;
pub mod machine;
pub mod service;
pub mod shipment;
pub mod snapshot;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::{load_config, TrackingConfig};
pub use core::{State, TrackingHistory, TrackingStatus, TrackingUpdate};
pub use machine::{Correction, TrackingMachine, TransitionError, UpdateCandidate};
pub use service::{TrackingEnv, TrackingError, TrackingView};
pub use store::{InMemoryShipmentStore, ShipmentStore, StoreError};
