//! Operator input for new tracking updates and corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed new tracking update, as received from an operator.
///
/// `status` is the raw external label; it is normalized when applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateCandidate {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Explicit observation time for back-dated entries; `None` means now
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl UpdateCandidate {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            location: None,
            timestamp: None,
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn observed_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Field-level overwrite of an existing tracking update.
///
/// Only provided fields change. A provided but blank location clears it.
/// The event timestamp is never corrected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Correction {
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Trim a free-text location, dropping it if blank.
pub(crate) fn clean_location(location: Option<&str>) -> Option<String> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}
