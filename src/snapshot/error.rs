//! Snapshot error types.

use crate::core::{ShipmentId, TrackingUpdateId};
use crate::shipment::TrackingNumber;
use thiserror::Error;

/// Errors raised while writing, reading or checking a store snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not encode store snapshot: {0}")]
    Encode(String),

    #[error("Could not decode store snapshot: {0}")]
    Decode(String),

    #[error("Store snapshot format v{found} is not supported (this build reads v{supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Shipment '{id}' appears more than once in the snapshot")]
    DuplicateShipment { id: ShipmentId },

    #[error("Tracking number '{tracking_number}' is used by more than one shipment")]
    DuplicateTrackingNumber { tracking_number: TrackingNumber },

    #[error("History of shipment '{shipment_id}' is filed under shipment '{filed_under}'")]
    MisfiledHistory {
        shipment_id: ShipmentId,
        filed_under: ShipmentId,
    },

    #[error("Tracking update '{id}' belongs to shipment '{owner}', not '{shipment_id}'")]
    ForeignEvent {
        id: TrackingUpdateId,
        owner: ShipmentId,
        shipment_id: ShipmentId,
    },

    /// Sequences must run 0, 1, 2, ... in log order.
    #[error("Tracking update '{id}' has sequence {found}, expected {expected}")]
    SequenceGap {
        id: TrackingUpdateId,
        found: u64,
        expected: u64,
    },

    #[error("Tracking update '{id}' appears more than once in the snapshot")]
    DuplicateEvent { id: TrackingUpdateId },
}
