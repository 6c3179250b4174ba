//! The shipment store boundary.
//!
//! The tracking core never talks to a database directly. It reads snapshots
//! of a shipment and its history through [`ShipmentStore`] and hands back
//! events to persist. Implementations must serialize appends per shipment:
//! [`ShipmentStore::append_tracking_update`] is an optimistic check-and-append
//! that fails with [`StoreError::Conflict`] if the history moved on since the
//! caller read it.

mod memory;

pub use memory::InMemoryShipmentStore;

use crate::core::{ShipmentId, TrackingHistory, TrackingUpdate, TrackingUpdateId, UserId};
use crate::shipment::{Shipment, TrackingNumber};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors reported by a shipment store
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Shipment '{id}' already exists")]
    DuplicateShipment { id: ShipmentId },

    #[error("Tracking number '{tracking_number}' is already in use")]
    DuplicateTrackingNumber { tracking_number: TrackingNumber },

    #[error("Shipment '{id}' not found")]
    UnknownShipment { id: ShipmentId },

    #[error("Tracking update '{id}' not found")]
    UnknownEvent { id: TrackingUpdateId },

    #[error(
        "History of shipment '{shipment_id}' changed: expected {expected} events, found {found}"
    )]
    Conflict {
        shipment_id: ShipmentId,
        expected: usize,
        found: usize,
    },

    #[error("Rejected tracking update '{id}': {reason}")]
    InvalidUpdate { id: TrackingUpdateId, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// How a caller refers to a shipment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShipmentKey {
    Id(ShipmentId),
    TrackingNumber(TrackingNumber),
}

impl fmt::Display for ShipmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => id.fmt(f),
            Self::TrackingNumber(number) => number.fmt(f),
        }
    }
}

impl From<ShipmentId> for ShipmentKey {
    fn from(id: ShipmentId) -> Self {
        Self::Id(id)
    }
}

impl From<TrackingNumber> for ShipmentKey {
    fn from(number: TrackingNumber) -> Self {
        Self::TrackingNumber(number)
    }
}

/// A shipment together with its full tracking history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment: Shipment,
    pub history: TrackingHistory,
}

/// Pagination request for listing shipments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipmentFilter {
    pub user_id: Option<UserId>,
    /// 1-based page number; 0 is treated as 1
    pub page: u32,
    pub page_size: u32,
}

/// One page of shipments, newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPage {
    pub items: Vec<Shipment>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
}

impl ShipmentPage {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as usize)
    }
}

/// Persistence for shipments and their tracking events.
pub trait ShipmentStore: Send + Sync {
    /// Store a new shipment with an empty history.
    fn insert_shipment(&self, shipment: Shipment) -> Result<(), StoreError>;

    /// Read a shipment and a consistent snapshot of its history.
    fn shipment_with_history(&self, key: &ShipmentKey)
        -> Result<Option<ShipmentRecord>, StoreError>;

    /// Append an event if the shipment still has exactly `expected_len` events.
    fn append_tracking_update(
        &self,
        update: TrackingUpdate,
        expected_len: usize,
    ) -> Result<TrackingUpdate, StoreError>;

    /// Overwrite an existing event in place (corrections).
    fn replace_tracking_update(&self, update: TrackingUpdate)
        -> Result<TrackingUpdate, StoreError>;

    /// Shipment an event belongs to.
    fn shipment_for_event(&self, id: TrackingUpdateId) -> Result<Option<ShipmentId>, StoreError>;

    fn list_shipments(&self, filter: &ShipmentFilter) -> Result<ShipmentPage, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = ShipmentPage {
            items: Vec::new(),
            total_count: 21,
            page: 1,
            page_size: 10,
        };

        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn key_displays_its_value() {
        let number = TrackingNumber::normalize("shp-00000001");

        assert_eq!(ShipmentKey::from(number).to_string(), "SHP-00000001");
    }
}
