//! Validation rules for proposed tracking updates and corrections.

use crate::core::TrackingStatus;
use crate::machine::{Correction, UpdateCandidate};
use crate::validation::violations::FieldViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Accumulated outcome of checking every field.
pub type FieldValidation = Validation<(), NonEmptyVec<FieldViolation>>;

/// Normalize a status label into the canonical set.
pub fn check_status(label: &str) -> Result<TrackingStatus, FieldViolation> {
    TrackingStatus::from_label(label).ok_or_else(|| FieldViolation::InvalidStatus {
        value: label.to_string(),
    })
}

/// Require a non-blank message, returning it trimmed.
pub fn check_message(message: &str) -> Result<&str, FieldViolation> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        Err(FieldViolation::EmptyMessage)
    } else {
        Ok(trimmed)
    }
}

/// Check every field of a candidate, accumulating ALL violations.
///
/// # Example
///
/// ```rust
/// use waybill::machine::UpdateCandidate;
/// use waybill::validation::validate_candidate;
/// use stillwater::validation::Validation;
///
/// let candidate = UpdateCandidate::new("teleported", "   ");
/// match validate_candidate(&candidate) {
///     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
///     Validation::Success(_) => panic!("expected both fields to fail"),
/// }
/// ```
pub fn validate_candidate(candidate: &UpdateCandidate) -> FieldValidation {
    let checks = vec![
        as_validation(check_status(&candidate.status)),
        as_validation(check_message(&candidate.message)),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Check the fields a correction provides, accumulating ALL violations.
///
/// Omitted fields are not checked; they keep their current value.
pub fn validate_correction(correction: &Correction) -> FieldValidation {
    let mut checks = Vec::new();

    if let Some(status) = &correction.status {
        checks.push(as_validation(check_status(status)));
    }
    if let Some(message) = &correction.message {
        checks.push(as_validation(check_message(message)));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn as_validation<T>(result: Result<T, FieldViolation>) -> FieldValidation {
    match result {
        Ok(_) => Validation::success(()),
        Err(violation) => Validation::fail(violation),
    }
}
