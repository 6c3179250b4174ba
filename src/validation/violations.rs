//! Field-level violations reported for operator input.

use thiserror::Error;

/// A single problem with one field of a proposed update or correction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldViolation {
    #[error("Unknown tracking status '{value}'")]
    InvalidStatus { value: String },

    #[error("Tracking update message must not be empty")]
    EmptyMessage,
}

impl FieldViolation {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidStatus { .. } => "status",
            Self::EmptyMessage => "message",
        }
    }
}
