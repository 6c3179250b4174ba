//! Validation of operator input using accumulated violations.
//!
//! The transition function itself fails fast on the first bad field. Form
//! layers that want to report every problem in one round trip use
//! [`validate_candidate`] and [`validate_correction`], which collect all
//! violations with Stillwater's `Validation` instead of stopping early.

pub mod rules;
pub mod violations;

pub use rules::{
    check_message, check_status, validate_candidate, validate_correction, FieldValidation,
};
pub use violations::FieldViolation;
