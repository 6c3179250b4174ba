//! Core State trait and the canonical tracking status vocabulary.
//!
//! All state machine states implement [`State`], which provides pure
//! methods for inspecting state properties without side effects.
//! [`TrackingStatus`] is the one status set the tracking machine stores
//! and reasons about; every external spelling is normalized into it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position of a shipment.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for persistence
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states close the shipment: no further forward transition
    /// is accepted once one is current.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Error states are exception outcomes. They are typically also
    /// final states, but this is not enforced.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Canonical status of a tracking update.
///
/// Serialized as snake_case strings, which is also the persisted form.
///
/// # Example
///
/// ```rust
/// use waybill::core::{State, TrackingStatus};
///
/// let status = TrackingStatus::from_label("In-Transit").unwrap();
/// assert_eq!(status, TrackingStatus::InTransit);
/// assert_eq!(status.name(), "in_transit");
/// assert!(!status.is_final());
/// assert!(TrackingStatus::Delivered.is_final());
///
/// // Display-only vocabulary is never storable.
/// assert!(TrackingStatus::from_label("out_for_delivery").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    InformationReceived,
    PickedUp,
    InTransit,
    Arrived,
    Departed,
    Delivered,
    Failed,
    OnHold,
    Returned,
    Pending,
    Processing,
}

impl TrackingStatus {
    /// Every canonical status, in declaration order.
    pub const ALL: [TrackingStatus; 11] = [
        Self::InformationReceived,
        Self::PickedUp,
        Self::InTransit,
        Self::Arrived,
        Self::Departed,
        Self::Delivered,
        Self::Failed,
        Self::OnHold,
        Self::Returned,
        Self::Pending,
        Self::Processing,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InformationReceived => "information_received",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::Arrived => "arrived",
            Self::Departed => "departed",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::OnHold => "on_hold",
            Self::Returned => "returned",
            Self::Pending => "pending",
            Self::Processing => "processing",
        }
    }

    /// Map an external status label onto the canonical set.
    ///
    /// Case, surrounding whitespace, hyphens and inner spaces are
    /// normalized away (`"IN-TRANSIT"`, `"in transit"` and `"in_transit"`
    /// are the same status). Anything that is not a canonical name after
    /// normalization returns `None`; there is no silent default.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_label(label);
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
    }
}

/// Lowercase, trim, and fold `-` and spaces into `_`.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl State for TrackingStatus {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed | Self::Returned)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed | Self::Returned)
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
