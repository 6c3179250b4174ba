//! Build errors for shipment drafts.

use thiserror::Error;

/// Errors that can occur when building a shipment draft.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Origin address not specified. Call .origin(address) before .build()")]
    MissingOrigin,

    #[error("Destination address not specified. Call .destination(address) before .build()")]
    MissingDestination,

    #[error("Recipient not specified. Call .recipient(recipient) before .build()")]
    MissingRecipient,

    #[error("No packages defined. Add at least one package")]
    NoPackages,

    #[error("Required field '{field}' is blank")]
    BlankField { field: String },

    #[error("Package {index} is invalid: {reason}")]
    InvalidPackage { index: usize, reason: String },
}
