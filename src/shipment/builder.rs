//! Builder for constructing shipment drafts.

use crate::core::UserId;
use crate::shipment::error::BuildError;
use crate::shipment::model::{Address, Package, Recipient, ServiceType, ShipmentDraft};

/// Builder for shipment drafts with a fluent API.
///
/// Packages and the recipient are collected here so that a shipment is
/// created with everything it owns in one step.
///
/// # Example
///
/// ```rust
/// use waybill::shipment::{Address, Package, Recipient, ShipmentDraftBuilder};
///
/// let address = |city: &str| Address {
///     street: "1 Dock Road".to_string(),
///     city: city.to_string(),
///     state: "Merseyside".to_string(),
///     postal_code: "L1 0AA".to_string(),
///     country: "GB".to_string(),
/// };
///
/// let draft = ShipmentDraftBuilder::new()
///     .origin(address("Liverpool"))
///     .destination(address("Bootle"))
///     .service("express")
///     .package(Package {
///         weight: 2.5,
///         length: 30.0,
///         width: 20.0,
///         height: 10.0,
///         declared_value: 120.0,
///         description: "Books".to_string(),
///         pieces: 1,
///         dangerous_goods: false,
///         insured: true,
///     })
///     .recipient(Recipient {
///         name: "Ada Byron".to_string(),
///         email: "ada@example.com".to_string(),
///         phone: "+44 151 000 0000".to_string(),
///         company: None,
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.packages.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ShipmentDraftBuilder {
    user_id: Option<UserId>,
    origin: Option<Address>,
    destination: Option<Address>,
    service_type: ServiceType,
    packages: Vec<Package>,
    recipient: Option<Recipient>,
}

impl ShipmentDraftBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Owning user (optional).
    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Set the origin address (required).
    pub fn origin(mut self, address: Address) -> Self {
        self.origin = Some(address);
        self
    }

    /// Set the destination address (required).
    pub fn destination(mut self, address: Address) -> Self {
        self.destination = Some(address);
        self
    }

    /// Set the service level from a free-form label. Defaults to standard.
    pub fn service(mut self, label: &str) -> Self {
        self.service_type = ServiceType::from_label(label);
        self
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = service_type;
        self
    }

    /// Add a package (at least one is required).
    pub fn package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Add multiple packages at once.
    pub fn packages(mut self, packages: Vec<Package>) -> Self {
        self.packages.extend(packages);
        self
    }

    /// Set the recipient (required).
    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Build the draft.
    /// Returns an error if required parts are missing or blank.
    pub fn build(self) -> Result<ShipmentDraft, BuildError> {
        let origin = self.origin.ok_or(BuildError::MissingOrigin)?;
        let destination = self.destination.ok_or(BuildError::MissingDestination)?;
        let recipient = self.recipient.ok_or(BuildError::MissingRecipient)?;

        if self.packages.is_empty() {
            return Err(BuildError::NoPackages);
        }

        check_address("origin", &origin)?;
        check_address("destination", &destination)?;
        check_recipient(&recipient)?;
        for (index, package) in self.packages.iter().enumerate() {
            check_package(index, package)?;
        }

        Ok(ShipmentDraft {
            user_id: self.user_id,
            origin,
            destination,
            service_type: self.service_type,
            packages: self.packages,
            recipient,
        })
    }
}

fn check_address(prefix: &str, address: &Address) -> Result<(), BuildError> {
    match address.blank_fields().first() {
        Some(field) => Err(BuildError::BlankField {
            field: format!("{prefix}.{field}"),
        }),
        None => Ok(()),
    }
}

fn check_recipient(recipient: &Recipient) -> Result<(), BuildError> {
    let required = [
        ("recipient.name", &recipient.name),
        ("recipient.email", &recipient.email),
        ("recipient.phone", &recipient.phone),
    ];
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(BuildError::BlankField {
            field: (*field).to_string(),
        }),
        None => Ok(()),
    }
}

fn check_package(index: usize, package: &Package) -> Result<(), BuildError> {
    let reason = if package.weight.is_nan() || package.weight <= 0.0 {
        Some("weight must be positive")
    } else if package.pieces == 0 {
        Some("at least one piece is required")
    } else if package.declared_value < 0.0 {
        Some("declared value must not be negative")
    } else if package.description.trim().is_empty() {
        Some("description is required")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BuildError::InvalidPackage {
            index,
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
