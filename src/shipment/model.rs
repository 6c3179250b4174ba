//! Shipment data model.

use crate::core::{ShipmentId, UserId};
use crate::shipment::tracking_number::TrackingNumber;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    /// State or province
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Names of required fields that are blank.
    pub(crate) fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// One physical package of a shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Weight in kilograms
    pub weight: f64,
    /// Dimensions in centimetres
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub declared_value: f64,
    pub description: String,
    pub pieces: u32,
    #[serde(default)]
    pub dangerous_goods: bool,
    #[serde(default)]
    pub insured: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
}

/// Service level; drives the delivery estimate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    Standard,
    Economy,
    Express,
}

impl ServiceType {
    /// Parse a free-form service label. Unrecognized labels are `Standard`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "express" => Self::Express,
            "economy" => Self::Economy,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Economy => "economy",
            Self::Express => "express",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for creating a shipment.
///
/// Built with [`ShipmentDraftBuilder`](crate::shipment::ShipmentDraftBuilder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDraft {
    pub user_id: Option<UserId>,
    pub origin: Address,
    pub destination: Address,
    pub service_type: ServiceType,
    pub packages: Vec<Package>,
    pub recipient: Recipient,
}

/// A shipping order. Owns its packages and recipient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_number: TrackingNumber,
    pub user_id: Option<UserId>,
    pub origin: Address,
    pub destination: Address,
    pub service_type: ServiceType,
    pub packages: Vec<Package>,
    pub recipient: Recipient,
    /// Fixed at creation; tracking events never move it
    pub estimated_delivery: NaiveDate,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    /// Materialize a draft into an unpaid shipment.
    pub fn from_draft(
        draft: ShipmentDraft,
        tracking_number: TrackingNumber,
        created_at: DateTime<Utc>,
        estimated_delivery: NaiveDate,
    ) -> Self {
        Self {
            id: ShipmentId::new(),
            tracking_number,
            user_id: draft.user_id,
            origin: draft.origin,
            destination: draft.destination,
            service_type: draft.service_type,
            packages: draft.packages,
            recipient: draft.recipient,
            estimated_delivery,
            is_paid: false,
            created_at,
        }
    }

    /// Total piece count across packages.
    pub fn total_pieces(&self) -> u32 {
        self.packages.iter().map(|p| p.pieces).sum()
    }

    /// Total weight across packages, in kilograms.
    pub fn total_weight(&self) -> f64 {
        self.packages.iter().map(|p| p.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_type_defaults_unknown_labels_to_standard() {
        assert_eq!(ServiceType::from_label("EXPRESS"), ServiceType::Express);
        assert_eq!(ServiceType::from_label(" economy "), ServiceType::Economy);
        assert_eq!(ServiceType::from_label("standard"), ServiceType::Standard);
        assert_eq!(ServiceType::from_label("overnight"), ServiceType::Standard);
        assert_eq!(ServiceType::from_label(""), ServiceType::Standard);
    }

    #[test]
    fn totals_sum_over_packages() {
        let address = Address {
            street: "5 Mill Lane".to_string(),
            city: "Derby".to_string(),
            state: "Derbyshire".to_string(),
            postal_code: "DE1 1AA".to_string(),
            country: "GB".to_string(),
        };
        let package = |weight: f64, pieces: u32| Package {
            weight,
            length: 10.0,
            width: 10.0,
            height: 10.0,
            declared_value: 25.0,
            description: "Parts".to_string(),
            pieces,
            dangerous_goods: false,
            insured: false,
        };
        let draft = ShipmentDraft {
            user_id: None,
            origin: address.clone(),
            destination: address,
            service_type: ServiceType::Economy,
            packages: vec![package(1.5, 2), package(2.25, 3)],
            recipient: Recipient {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "01332 000000".to_string(),
                company: None,
            },
        };
        let created_at = Utc::now();

        let shipment = Shipment::from_draft(
            draft,
            TrackingNumber::normalize("shp-totals01"),
            created_at,
            created_at.date_naive(),
        );

        assert_eq!(shipment.total_pieces(), 5);
        assert_eq!(shipment.total_weight(), 3.75);
        assert!(!shipment.is_paid);
    }

    #[test]
    fn address_reports_blank_fields() {
        let address = Address {
            street: "1 Quay St".to_string(),
            city: " ".to_string(),
            state: "Lancs".to_string(),
            postal_code: String::new(),
            country: "UK".to_string(),
        };

        assert_eq!(address.blank_fields(), vec!["city", "postal_code"]);
    }
}
