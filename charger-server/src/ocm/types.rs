//! Open Charge Map wire types.
//!
//! Minimal DTOs for the `/poi` response - we only read the fields the
//! directory needs. Every field is optional because the registry is
//! community-maintained and records are frequently incomplete.

use serde::{Deserialize, Serialize};

/// A point-of-interest record from the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Numeric registry identifier.
    #[serde(rename = "ID")]
    pub id: Option<i64>,

    /// Location details.
    #[serde(rename = "AddressInfo")]
    pub address_info: Option<AddressInfo>,

    /// Operational status details.
    #[serde(rename = "StatusType")]
    pub status_type: Option<StatusType>,
}

/// Location details for a POI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressInfo {
    #[serde(rename = "Title")]
    pub title: Option<String>,

    #[serde(rename = "Town")]
    pub town: Option<String>,

    #[serde(rename = "StateOrProvince")]
    pub state_or_province: Option<String>,

    #[serde(rename = "Postcode")]
    pub postcode: Option<String>,

    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

/// Operational status for a POI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusType {
    #[serde(rename = "IsOperational")]
    pub is_operational: Option<bool>,
}
