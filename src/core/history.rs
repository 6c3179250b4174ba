//! Tracking update events and the per-shipment history log.
//!
//! A history is an append-only log of [`TrackingUpdate`]s kept in insertion
//! order. It is never re-sorted; the current status is derived by folding
//! over it, comparing timestamps and falling back to insertion order on ties.

use super::ids::{ShipmentId, TrackingUpdateId};
use super::state::{State, TrackingStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One timestamped status observation for a shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub id: TrackingUpdateId,
    /// Shipment this event is recorded against (a reference, not ownership)
    pub shipment_id: ShipmentId,
    /// 0-based insertion index within the shipment's history
    pub sequence: u64,
    pub status: TrackingStatus,
    pub message: String,
    pub location: Option<String>,
    /// Observation time; may be back-dated by the operator
    pub timestamp: DateTime<Utc>,
    /// Set when an administrative correction last touched this event
    pub corrected_at: Option<DateTime<Utc>>,
    /// Status as originally appended, kept once the event has been corrected
    pub original_status: Option<TrackingStatus>,
}

impl TrackingUpdate {
    /// Status this event carried when it was appended.
    pub fn appended_status(&self) -> TrackingStatus {
        self.original_status.unwrap_or(self.status)
    }

    pub fn is_corrected(&self) -> bool {
        self.corrected_at.is_some()
    }
}

/// Ordered tracking history of one shipment.
///
/// History is immutable - [`record`](Self::record) and
/// [`replace`](Self::replace) return a new history.
///
/// # Example
///
/// ```rust
/// use waybill::core::{
///     ShipmentId, TrackingHistory, TrackingStatus, TrackingUpdate, TrackingUpdateId,
/// };
/// use chrono::{Duration, Utc};
///
/// let shipment_id = ShipmentId::new();
/// let history = TrackingHistory::new(shipment_id);
/// assert_eq!(history.current_status(), TrackingStatus::Pending);
///
/// let received = Utc::now();
/// let history = history.record(TrackingUpdate {
///     id: TrackingUpdateId::new(),
///     shipment_id,
///     sequence: 0,
///     status: TrackingStatus::InformationReceived,
///     message: "Label created".to_string(),
///     location: None,
///     timestamp: received,
///     corrected_at: None,
///     original_status: None,
/// });
/// let history = history.record(TrackingUpdate {
///     id: TrackingUpdateId::new(),
///     shipment_id,
///     sequence: 1,
///     status: TrackingStatus::InTransit,
///     message: "Departed hub".to_string(),
///     location: Some("Leeds".to_string()),
///     timestamp: received + Duration::hours(4),
///     corrected_at: None,
///     original_status: None,
/// });
///
/// assert_eq!(history.current_status(), TrackingStatus::InTransit);
/// assert_eq!(history.status_path(), vec![
///     TrackingStatus::InformationReceived,
///     TrackingStatus::InTransit,
/// ]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingHistory {
    shipment_id: ShipmentId,
    updates: Vec<TrackingUpdate>,
}

impl TrackingHistory {
    /// Create an empty history for a shipment.
    pub fn new(shipment_id: ShipmentId) -> Self {
        Self {
            shipment_id,
            updates: Vec::new(),
        }
    }

    /// Rebuild a history from persisted events.
    ///
    /// Events are placed in `sequence` order; rows belonging to other
    /// shipments are dropped.
    pub fn from_updates(shipment_id: ShipmentId, updates: Vec<TrackingUpdate>) -> Self {
        let mut updates: Vec<_> = updates
            .into_iter()
            .filter(|u| u.shipment_id == shipment_id)
            .collect();
        updates.sort_by_key(|u| u.sequence);
        Self {
            shipment_id,
            updates,
        }
    }

    pub fn shipment_id(&self) -> ShipmentId {
        self.shipment_id
    }

    /// Record an event, returning a new history.
    ///
    /// This is a pure function - the existing history is not mutated.
    pub fn record(&self, update: TrackingUpdate) -> Self {
        let mut updates = self.updates.clone();
        updates.push(update);
        Self {
            shipment_id: self.shipment_id,
            updates,
        }
    }

    /// Swap the event carrying `update.id` for `update`, keeping its slot.
    ///
    /// Returns `None` if no event has that id.
    pub fn replace(&self, update: TrackingUpdate) -> Option<Self> {
        let index = self.updates.iter().position(|u| u.id == update.id)?;
        let mut updates = self.updates.clone();
        updates[index] = update;
        Some(Self {
            shipment_id: self.shipment_id,
            updates,
        })
    }

    /// All events in insertion order.
    pub fn updates(&self) -> &[TrackingUpdate] {
        &self.updates
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn get(&self, id: TrackingUpdateId) -> Option<&TrackingUpdate> {
        self.updates.iter().find(|u| u.id == id)
    }

    /// Sequence number the next appended event receives.
    pub fn next_sequence(&self) -> u64 {
        self.updates.len() as u64
    }

    /// The most recent event: greatest timestamp, later insertion on ties.
    pub fn latest(&self) -> Option<&TrackingUpdate> {
        self.updates
            .iter()
            .max_by(|a, b| (a.timestamp, a.sequence).cmp(&(b.timestamp, b.sequence)))
    }

    /// Status of the most recent event, or `Pending` when there is none.
    pub fn current_status(&self) -> TrackingStatus {
        self.latest()
            .map(|u| u.status)
            .unwrap_or(TrackingStatus::Pending)
    }

    /// Statuses that decide whether the shipment is locked.
    ///
    /// The current status comes first, followed by what the current event
    /// said when it was appended. A correction keeps an event's timestamp and
    /// sequence, so a corrected terminal event stays current and keeps
    /// locking the shipment. Back-dated events that never became current
    /// play no part.
    pub fn lock_statuses(&self) -> impl Iterator<Item = TrackingStatus> {
        let appended = self.latest().map(TrackingUpdate::appended_status);
        std::iter::once(self.current_status()).chain(appended)
    }

    /// The final status that closed the shipment, if any.
    pub fn closing_status(&self) -> Option<TrackingStatus> {
        self.lock_statuses().find(|status| status.is_final())
    }

    /// Whether the shipment no longer accepts forward transitions.
    pub fn is_closed(&self) -> bool {
        self.closing_status().is_some()
    }

    /// Statuses in insertion order.
    pub fn status_path(&self) -> Vec<TrackingStatus> {
        self.updates.iter().map(|u| u.status).collect()
    }

    /// Span between the earliest and latest observation.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let earliest = self.updates.iter().map(|u| u.timestamp).min()?;
        let latest = self.updates.iter().map(|u| u.timestamp).max()?;
        latest.signed_duration_since(earliest).to_std().ok()
    }
}
