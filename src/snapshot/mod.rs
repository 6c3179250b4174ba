//! Snapshots of a shipment store.
//!
//! A snapshot carries every shipment with its full tracking history, which
//! is enough to rebuild current status and progress deterministically. It
//! can be written as JSON for inspection or as compact binary.

use crate::shipment::TrackingNumber;
use crate::store::ShipmentRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a shipment store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Shipments with their histories, oldest shipment first
    pub records: Vec<ShipmentRecord>,
}

impl StoreSnapshot {
    pub fn new(records: Vec<ShipmentRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            records,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }

    /// Check the snapshot is internally consistent.
    ///
    /// Shipment ids, tracking numbers and event ids must be unique; every
    /// event must belong to the shipment it is filed under, and sequences
    /// must run 0, 1, 2, ... without gaps.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.check_version()?;

        let mut shipment_ids = HashSet::new();
        let mut tracking_numbers = HashSet::new();
        let mut event_ids = HashSet::new();

        for record in &self.records {
            let shipment = &record.shipment;
            if !shipment_ids.insert(shipment.id) {
                return Err(SnapshotError::DuplicateShipment { id: shipment.id });
            }
            let number = TrackingNumber::normalize(shipment.tracking_number.as_str());
            if !tracking_numbers.insert(number.clone()) {
                return Err(SnapshotError::DuplicateTrackingNumber {
                    tracking_number: number,
                });
            }
            if record.history.shipment_id() != shipment.id {
                return Err(SnapshotError::MisfiledHistory {
                    shipment_id: shipment.id,
                    filed_under: record.history.shipment_id(),
                });
            }

            for (expected, update) in (0u64..).zip(record.history.updates()) {
                if update.shipment_id != shipment.id {
                    return Err(SnapshotError::ForeignEvent {
                        id: update.id,
                        owner: update.shipment_id,
                        shipment_id: shipment.id,
                    });
                }
                if update.sequence != expected {
                    return Err(SnapshotError::SequenceGap {
                        id: update.id,
                        found: update.sequence,
                        expected,
                    });
                }
                if !event_ids.insert(update.id) {
                    return Err(SnapshotError::DuplicateEvent { id: update.id });
                }
            }
        }
        Ok(())
    }
}
