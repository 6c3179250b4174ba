//! Display progress derived from a status.
//!
//! Progress is a UI value only. It ranks a status within the ideal
//! delivery sequence, which includes `out_for_delivery` even though that
//! label is never a storable status.

use super::state::{normalize_label, TrackingStatus};

/// Lowest value ever reported, also used for statuses outside the sequence.
pub const MIN_PROGRESS: f64 = 10.0;

const MAX_PROGRESS: f64 = 100.0;

/// Ideal delivery sequence, by display label.
pub const DISPLAY_SEQUENCE: [&str; 8] = [
    "information_received",
    "processing",
    "picked_up",
    "departed",
    "in_transit",
    "arrived",
    "out_for_delivery",
    "delivered",
];

/// Progress for a canonical status, in `[10, 100]`.
///
/// # Example
///
/// ```rust
/// use waybill::core::{progress_percent, TrackingStatus};
///
/// assert_eq!(progress_percent(TrackingStatus::Pending), 10.0);
/// assert_eq!(progress_percent(TrackingStatus::InTransit), 62.5);
/// assert_eq!(progress_percent(TrackingStatus::Delivered), 100.0);
/// ```
pub fn progress_percent(status: TrackingStatus) -> f64 {
    progress_for_normalized(status.as_str())
}

/// Progress for an external display label such as `"Out-For-Delivery"`.
///
/// Unknown labels fall back to [`MIN_PROGRESS`].
pub fn progress_percent_for_label(label: &str) -> f64 {
    progress_for_normalized(&normalize_label(label))
}

fn progress_for_normalized(label: &str) -> f64 {
    match DISPLAY_SEQUENCE.iter().position(|step| *step == label) {
        Some(index) => {
            let percent = (index + 1) as f64 / DISPLAY_SEQUENCE.len() as f64 * 100.0;
            percent.clamp(MIN_PROGRESS, MAX_PROGRESS)
        }
        None => MIN_PROGRESS,
    }
}
