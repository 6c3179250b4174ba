//! Service error types.

use crate::core::ShipmentId;
use crate::machine::TransitionError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by tracking service operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Gave up appending to shipment '{shipment_id}' after {attempts} conflicting attempts")]
    ConflictRetriesExhausted { shipment_id: ShipmentId, attempts: u32 },

    #[error("No unused tracking number found after {attempts} attempts")]
    TrackingNumbersExhausted { attempts: u32 },
}

impl TrackingError {
    /// Whether this maps to a 404-style outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Transition(
                TransitionError::ShipmentNotFound { .. } | TransitionError::EventNotFound { .. }
            )
        )
    }

    /// The state machine's own verdict, if that is what failed.
    pub fn transition(&self) -> Option<&TransitionError> {
        match self {
            Self::Transition(error) => Some(error),
            _ => None,
        }
    }
}
