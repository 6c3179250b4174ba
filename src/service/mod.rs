//! Tracking service operations using Stillwater effects.
//!
//! The service is the imperative shell around [`crate::machine`]:
//!
//! - **Pure core**: the machine decides whether an update is accepted
//! - **Effects**: reads, appends and notifications run against an explicit
//!   [`TrackingEnv`]
//! - **Concurrency**: appends are checked against the history length that
//!   was read; a conflicting append re-reads and re-decides, a bounded
//!   number of times
//!
//! ```rust,ignore
//! let env = TrackingEnv::in_memory();
//! let shipment = create_shipment(draft).run(&env).await?;
//! record_update(shipment.id, UpdateCandidate::new("picked_up", "Collected"))
//!     .run(&env)
//!     .await?;
//! let view = track_shipment(shipment.tracking_number.as_str()).run(&env).await?;
//! ```

mod env;
mod error;
mod notifier;
mod tracking;

pub use env::TrackingEnv;
pub use error::TrackingError;
pub use notifier::{NoopNotifier, Notifier, NotifyError, StatusNotice};
pub use tracking::{
    correct_update, create_shipment, list_shipments, record_update, track_shipment, TrackingView,
};
