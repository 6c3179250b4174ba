//! Outbound status notifications.

use crate::core::{ShipmentId, TrackingStatus, TrackingUpdate};
use crate::shipment::TrackingNumber;
use thiserror::Error;

/// A shipment's current status changed.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusNotice {
    pub shipment_id: ShipmentId,
    pub tracking_number: TrackingNumber,
    pub recipient_email: String,
    pub previous: TrackingStatus,
    pub current: TrackingStatus,
    /// The event that caused the change
    pub update: TrackingUpdate,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Delivery of status notices (email, webhooks, ...).
///
/// Notifications are best-effort: a failure is logged and never undoes or
/// fails the tracking update that triggered it.
pub trait Notifier: Send + Sync {
    fn status_changed(&self, notice: &StatusNotice) -> Result<(), NotifyError>;
}

/// Notifier that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn status_changed(&self, _notice: &StatusNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}
