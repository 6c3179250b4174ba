//! Tracking configuration.
//!
//! Loaded from a TOML file; every field has a default, so a missing file or
//! a partial file is fine.
//!
//! ```toml
//! tracking_prefix = "WB"
//! max_append_attempts = 5
//!
//! [transit_days]
//! express = 1
//! ```

use crate::shipment::ServiceType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Business days from creation to estimated delivery, per service type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitDays {
    pub express: u32,
    pub standard: u32,
    pub economy: u32,
}

impl TransitDays {
    pub fn for_service(&self, service: ServiceType) -> u32 {
        match service {
            ServiceType::Express => self.express,
            ServiceType::Standard => self.standard,
            ServiceType::Economy => self.economy,
        }
    }
}

impl Default for TransitDays {
    fn default() -> Self {
        Self {
            express: 2,
            standard: 5,
            economy: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Prefix of generated tracking numbers
    pub tracking_prefix: String,
    pub transit_days: TransitDays,
    /// Attempts at the optimistic check-and-append before giving up
    pub max_append_attempts: u32,
    /// Attempts at drawing an unused tracking number
    pub max_tracking_number_attempts: u32,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tracking_prefix: "SHP".to_string(),
            transit_days: TransitDays::default(),
            max_append_attempts: 3,
            max_tracking_number_attempts: 5,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl TrackingConfig {
    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = self.tracking_prefix.trim();
        if prefix.is_empty() {
            return Err(ConfigError::Invalid("tracking_prefix must not be blank".into()));
        }
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "tracking_prefix '{prefix}' must be ASCII alphanumeric"
            )));
        }
        if self.max_append_attempts == 0 {
            return Err(ConfigError::Invalid("max_append_attempts must be at least 1".into()));
        }
        if self.max_tracking_number_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_tracking_number_attempts must be at least 1".into(),
            ));
        }
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be at least 1".into()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Clamp a requested page size, defaulting when none is given.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

/// Load configuration from a TOML file.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<TrackingConfig, ConfigError> {
    if !path.exists() {
        return Ok(TrackingConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: TrackingConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}
