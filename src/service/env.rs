//! The environment tracking effects run against.

use crate::config::{ConfigError, TrackingConfig};
use crate::machine::TrackingMachine;
use crate::service::notifier::{NoopNotifier, Notifier};
use crate::store::{InMemoryShipmentStore, ShipmentStore};
use std::sync::Arc;

/// Explicitly constructed dependencies of the tracking service.
///
/// The hosting application builds one and owns its lifecycle; effects
/// borrow it only while they run.
#[derive(Clone)]
pub struct TrackingEnv {
    pub store: Arc<dyn ShipmentStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<TrackingConfig>,
    pub machine: Arc<TrackingMachine>,
}

impl TrackingEnv {
    /// Build an environment, rejecting invalid configuration.
    pub fn new(store: Arc<dyn ShipmentStore>, config: TrackingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            notifier: Arc::new(NoopNotifier),
            config: Arc::new(config),
            machine: Arc::new(TrackingMachine::new()),
        })
    }

    /// Environment over a fresh in-memory store with default configuration.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemoryShipmentStore::new()),
            notifier: Arc::new(NoopNotifier),
            config: Arc::new(TrackingConfig::default()),
            machine: Arc::new(TrackingMachine::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
