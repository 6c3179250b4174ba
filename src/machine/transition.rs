//! The tracking transition function.

use crate::core::{Guard, State, TrackingHistory, TrackingStatus, TrackingUpdate, TrackingUpdateId};
use crate::machine::candidate::{clean_location, Correction, UpdateCandidate};
use crate::validation::{check_message, check_status, FieldViolation};
use chrono::{DateTime, Utc};

/// Errors that can occur when applying or correcting a tracking update
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("Unknown tracking status '{value}'")]
    InvalidStatus { value: String },

    #[error("Tracking update message must not be empty")]
    EmptyMessage,

    /// `status` is the final status that closed the shipment.
    #[error("Shipment is closed: it reached '{status}'")]
    ShipmentClosed { status: TrackingStatus },

    #[error("Shipment '{key}' not found")]
    ShipmentNotFound { key: String },

    #[error("Tracking update '{id}' not found")]
    EventNotFound { id: TrackingUpdateId },
}

impl From<FieldViolation> for TransitionError {
    fn from(violation: FieldViolation) -> Self {
        match violation {
            FieldViolation::InvalidStatus { value } => Self::InvalidStatus { value },
            FieldViolation::EmptyMessage => Self::EmptyMessage,
        }
    }
}

/// Decides whether tracking updates are legal and builds the resulting events.
///
/// The machine holds no shipment state. Every call takes a snapshot of a
/// history and returns the event to persist; the caller owns storage.
///
/// # Example
///
/// ```rust
/// use waybill::core::{ShipmentId, TrackingHistory, TrackingStatus};
/// use waybill::machine::{TrackingMachine, TransitionError, UpdateCandidate};
///
/// let machine = TrackingMachine::new();
/// let history = TrackingHistory::new(ShipmentId::new());
///
/// let delivered = machine
///     .apply(&history, &UpdateCandidate::new("delivered", "Left with neighbour"))
///     .unwrap();
/// let history = history.record(delivered);
/// assert_eq!(history.current_status(), TrackingStatus::Delivered);
///
/// let retry = machine.apply(&history, &UpdateCandidate::new("in_transit", "retry"));
/// assert!(matches!(retry, Err(TransitionError::ShipmentClosed { .. })));
/// ```
#[derive(Debug)]
pub struct TrackingMachine {
    forward: Guard<TrackingStatus>,
}

impl TrackingMachine {
    pub fn new() -> Self {
        Self {
            forward: Guard::new(|status: &TrackingStatus| !status.is_final()),
        }
    }

    /// Whether a new event may be appended to this history.
    pub fn accepts_updates(&self, history: &TrackingHistory) -> bool {
        self.lock(history).is_none()
    }

    /// First status of the history that the forward guard refuses.
    fn lock(&self, history: &TrackingHistory) -> Option<TrackingStatus> {
        history
            .lock_statuses()
            .find(|status| !self.forward.check(status))
    }

    /// Validate `candidate` against `history` and build the event to append.
    pub fn apply(
        &self,
        history: &TrackingHistory,
        candidate: &UpdateCandidate,
    ) -> Result<TrackingUpdate, TransitionError> {
        self.apply_at(history, candidate, Utc::now())
    }

    /// Like [`apply`](Self::apply) with an explicit clock reading.
    pub fn apply_at(
        &self,
        history: &TrackingHistory,
        candidate: &UpdateCandidate,
        now: DateTime<Utc>,
    ) -> Result<TrackingUpdate, TransitionError> {
        let status = check_status(&candidate.status)?;
        let message = check_message(&candidate.message)?;

        if let Some(status) = self.lock(history) {
            return Err(TransitionError::ShipmentClosed { status });
        }

        // Non-final statuses are accepted in any order; facilities report out of order.
        Ok(TrackingUpdate {
            id: TrackingUpdateId::new(),
            shipment_id: history.shipment_id(),
            sequence: history.next_sequence(),
            status,
            message: message.to_string(),
            location: clean_location(candidate.location.as_deref()),
            timestamp: candidate.timestamp.unwrap_or(now),
            corrected_at: None,
            original_status: None,
        })
    }

    /// Overwrite fields of an existing event.
    ///
    /// Corrections bypass the terminal lock and keep the event's timestamp
    /// and position. They never re-open a closed shipment.
    pub fn correct(
        &self,
        history: &TrackingHistory,
        id: TrackingUpdateId,
        correction: &Correction,
    ) -> Result<TrackingUpdate, TransitionError> {
        self.correct_at(history, id, correction, Utc::now())
    }

    /// Like [`correct`](Self::correct) with an explicit clock reading.
    pub fn correct_at(
        &self,
        history: &TrackingHistory,
        id: TrackingUpdateId,
        correction: &Correction,
        now: DateTime<Utc>,
    ) -> Result<TrackingUpdate, TransitionError> {
        let existing = history
            .get(id)
            .ok_or(TransitionError::EventNotFound { id })?;

        let status = correction
            .status
            .as_deref()
            .map(check_status)
            .transpose()?;
        let message = correction
            .message
            .as_deref()
            .map(check_message)
            .transpose()?;

        let mut corrected = existing.clone();
        if let Some(status) = status {
            corrected.status = status;
        }
        if let Some(message) = message {
            corrected.message = message.to_string();
        }
        if correction.location.is_some() {
            corrected.location = clean_location(correction.location.as_deref());
        }
        corrected.original_status = Some(existing.appended_status());
        corrected.corrected_at = Some(now);

        Ok(corrected)
    }
}

impl Default for TrackingMachine {
    fn default() -> Self {
        Self::new()
    }
}
