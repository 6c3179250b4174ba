//! In-memory shipment store.

use crate::core::{ShipmentId, TrackingHistory, TrackingUpdate, TrackingUpdateId};
use crate::shipment::{Shipment, TrackingNumber};
use crate::snapshot::{SnapshotError, StoreSnapshot};
use crate::store::{
    ShipmentFilter, ShipmentKey, ShipmentPage, ShipmentRecord, ShipmentStore, StoreError,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Shipment store backed by hash maps behind a single `RwLock`.
///
/// Each shipment's events live in an append-only log indexed by shipment
/// id. The write lock makes check-and-append atomic.
#[derive(Debug, Default)]
pub struct InMemoryShipmentStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    shipments: HashMap<ShipmentId, Shipment>,
    by_tracking_number: HashMap<TrackingNumber, ShipmentId>,
    events: HashMap<ShipmentId, Vec<TrackingUpdate>>,
    event_owner: HashMap<TrackingUpdateId, ShipmentId>,
}

impl Inner {
    fn resolve(&self, key: &ShipmentKey) -> Option<ShipmentId> {
        match key {
            ShipmentKey::Id(id) => self.shipments.contains_key(id).then_some(*id),
            ShipmentKey::TrackingNumber(number) => self
                .by_tracking_number
                .get(&TrackingNumber::normalize(number.as_str()))
                .copied(),
        }
    }

    fn record(&self, id: ShipmentId) -> Option<ShipmentRecord> {
        let shipment = self.shipments.get(&id)?.clone();
        let updates = self.events.get(&id).cloned().unwrap_or_default();
        Some(ShipmentRecord {
            shipment,
            history: TrackingHistory::from_updates(id, updates),
        })
    }
}

impl InMemoryShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    /// Capture every shipment and its history.
    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        let inner = self.read()?;
        let mut records: Vec<ShipmentRecord> = inner
            .shipments
            .keys()
            .filter_map(|id| inner.record(*id))
            .collect();
        records.sort_by(|a, b| {
            (a.shipment.created_at, a.shipment.id).cmp(&(b.shipment.created_at, b.shipment.id))
        });
        Ok(StoreSnapshot::new(records))
    }

    /// Rebuild a store from a snapshot, checking its integrity first.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let mut inner = Inner::default();
        for record in snapshot.records {
            let id = record.shipment.id;
            for update in record.history.updates() {
                inner.event_owner.insert(update.id, id);
            }
            inner.by_tracking_number.insert(
                TrackingNumber::normalize(record.shipment.tracking_number.as_str()),
                id,
            );
            inner.events.insert(id, record.history.updates().to_vec());
            inner.shipments.insert(id, record.shipment);
        }

        info!(
            shipments = inner.shipments.len(),
            events = inner.event_owner.len(),
            "restored shipment store from snapshot"
        );

        Ok(Self {
            inner: RwLock::new(inner),
        })
    }
}

impl ShipmentStore for InMemoryShipmentStore {
    fn insert_shipment(&self, shipment: Shipment) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        let number = TrackingNumber::normalize(shipment.tracking_number.as_str());

        if inner.shipments.contains_key(&shipment.id) {
            return Err(StoreError::DuplicateShipment { id: shipment.id });
        }
        if inner.by_tracking_number.contains_key(&number) {
            return Err(StoreError::DuplicateTrackingNumber {
                tracking_number: number,
            });
        }

        debug!(
            shipment_id = %shipment.id,
            tracking_number = %shipment.tracking_number,
            "inserting shipment"
        );
        inner.by_tracking_number.insert(number, shipment.id);
        inner.events.insert(shipment.id, Vec::new());
        inner.shipments.insert(shipment.id, shipment);
        Ok(())
    }

    fn shipment_with_history(
        &self,
        key: &ShipmentKey,
    ) -> Result<Option<ShipmentRecord>, StoreError> {
        let inner = self.read()?;
        Ok(inner.resolve(key).and_then(|id| inner.record(id)))
    }

    fn append_tracking_update(
        &self,
        update: TrackingUpdate,
        expected_len: usize,
    ) -> Result<TrackingUpdate, StoreError> {
        let mut inner = self.write()?;
        let shipment_id = update.shipment_id;

        if inner.event_owner.contains_key(&update.id) {
            return Err(StoreError::InvalidUpdate {
                id: update.id,
                reason: "event id already recorded".to_string(),
            });
        }

        let log = inner
            .events
            .get_mut(&shipment_id)
            .ok_or(StoreError::UnknownShipment { id: shipment_id })?;

        if log.len() != expected_len {
            return Err(StoreError::Conflict {
                shipment_id,
                expected: expected_len,
                found: log.len(),
            });
        }
        if update.sequence != expected_len as u64 {
            return Err(StoreError::InvalidUpdate {
                id: update.id,
                reason: format!(
                    "sequence {} does not follow {} existing events",
                    update.sequence, expected_len
                ),
            });
        }

        log.push(update.clone());
        inner.event_owner.insert(update.id, shipment_id);
        Ok(update)
    }

    fn replace_tracking_update(
        &self,
        update: TrackingUpdate,
    ) -> Result<TrackingUpdate, StoreError> {
        let mut inner = self.write()?;

        let owner = inner
            .event_owner
            .get(&update.id)
            .copied()
            .ok_or(StoreError::UnknownEvent { id: update.id })?;
        if owner != update.shipment_id {
            return Err(StoreError::InvalidUpdate {
                id: update.id,
                reason: "event cannot move to another shipment".to_string(),
            });
        }

        let slot = inner
            .events
            .get_mut(&owner)
            .and_then(|log| log.iter_mut().find(|u| u.id == update.id))
            .ok_or(StoreError::UnknownEvent { id: update.id })?;

        if slot.sequence != update.sequence || slot.timestamp != update.timestamp {
            return Err(StoreError::InvalidUpdate {
                id: update.id,
                reason: "sequence and timestamp are immutable".to_string(),
            });
        }

        *slot = update.clone();
        Ok(update)
    }

    fn shipment_for_event(&self, id: TrackingUpdateId) -> Result<Option<ShipmentId>, StoreError> {
        Ok(self.read()?.event_owner.get(&id).copied())
    }

    fn list_shipments(&self, filter: &ShipmentFilter) -> Result<ShipmentPage, StoreError> {
        let inner = self.read()?;

        let mut matching: Vec<&Shipment> = inner
            .shipments
            .values()
            .filter(|s| filter.user_id.is_none() || s.user_id == filter.user_id)
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let page = filter.page.max(1);
        let offset = (page as usize - 1).saturating_mul(filter.page_size as usize);
        let items = matching
            .iter()
            .skip(offset)
            .take(filter.page_size as usize)
            .map(|s| (*s).clone())
            .collect();

        Ok(ShipmentPage {
            items,
            total_count: matching.len(),
            page,
            page_size: filter.page_size,
        })
    }
}
