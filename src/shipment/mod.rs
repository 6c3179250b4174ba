//! Shipments: the orders whose tracking history the machine reasons about.
//!
//! A shipment is created once, atomically with its packages and recipient,
//! from a validated [`ShipmentDraft`]. Its tracking number and estimated
//! delivery date are fixed at creation.

pub mod builder;
pub mod delivery;
pub mod error;
pub mod model;
pub mod tracking_number;

pub use builder::ShipmentDraftBuilder;
pub use delivery::{add_business_days, estimate_delivery};
pub use error::BuildError;
pub use model::{Address, Package, Recipient, ServiceType, Shipment, ShipmentDraft};
pub use tracking_number::TrackingNumber;
