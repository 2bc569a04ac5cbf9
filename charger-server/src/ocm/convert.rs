//! Conversion from Open Charge Map DTOs to domain types.
//!
//! This module handles the transformation of raw registry records into
//! `Station` values, including town-name normalization. Conversion is
//! infallible: missing fields stay missing rather than failing a record,
//! and a whole sync is never aborted by one bad entry.

use crate::domain::{ChargerId, ChargerStatus, Station};

use super::types::Poi;

/// Town label used when the registry has no usable town.
const UNKNOWN_TOWN: &str = "Unknown";

/// Convert a batch of registry records to stations.
pub fn convert_pois(pois: &[Poi]) -> Vec<Station> {
    pois.iter().map(convert_poi).collect()
}

/// Convert a single registry record to a station.
pub fn convert_poi(poi: &Poi) -> Station {
    let addr = poi.address_info.as_ref();

    let id = poi
        .id
        .map(|n| n.to_string())
        .and_then(|s| ChargerId::parse(&s).ok());

    let status = ChargerStatus::from_operational(
        poi.status_type.as_ref().and_then(|s| s.is_operational),
    );

    Station {
        id,
        title: addr.and_then(|a| a.title.clone()),
        town: normalize_town(
            addr.and_then(|a| a.town.as_deref()),
            addr.and_then(|a| a.postcode.as_deref()),
        ),
        latitude: addr.and_then(|a| a.latitude),
        longitude: addr.and_then(|a| a.longitude),
        status,
    }
}

/// Normalize a town name.
///
/// The registry spells the capital three different ways, and many Belgrade
/// records carry a suburb as the town with only the postcode (11xxx)
/// giving the city away. Records with no town at all become "Unknown".
pub fn normalize_town(town: Option<&str>, postcode: Option<&str>) -> String {
    if let Some(town) = town {
        if matches!(town, "Belgrad" | "Belgrade" | "Beograd") {
            return "Belgrade".to_string();
        }
    }

    if postcode.is_some_and(|p| p.starts_with("11")) {
        return "Belgrade".to_string();
    }

    match town {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNKNOWN_TOWN.to_string(),
    }
}
