//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::proximity::RankedStation;

/// Query parameters for the charger list.
#[derive(Debug, Deserialize)]
pub struct ListChargersQuery {
    /// Optional town filter (exact match on the normalized name)
    pub town: Option<String>,
}

/// A charger in API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargerView {
    /// Registry identifier, when one was assigned
    pub charger_id: Option<String>,

    /// Display title
    pub title: Option<String>,

    /// Normalized town name
    pub town: String,

    /// Latitude in degrees
    pub latitude: Option<f64>,

    /// Longitude in degrees
    pub longitude: Option<f64>,

    /// Status label: "Available", "Offline" or "Unknown"
    pub status: String,
}

impl ChargerView {
    /// Build a view from a domain station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            charger_id: station.id.as_ref().map(|id| id.as_str().to_string()),
            title: station.title.clone(),
            town: station.town.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            status: station.status.to_string(),
        }
    }
}

/// Response for the charger list.
#[derive(Debug, Serialize)]
pub struct ChargerListResponse {
    /// Matching chargers
    pub chargers: Vec<ChargerView>,
}

/// Query parameters for the nearby ranking.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    /// Latitude of the reference position (paired with `lon`)
    pub lat: Option<f64>,

    /// Longitude of the reference position (paired with `lat`)
    pub lon: Option<f64>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A ranked charger with its distance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyEntry {
    /// The charger
    pub charger: ChargerView,

    /// Approximate distance from the reference position in kilometers
    pub distance_km: f64,
}

impl NearbyEntry {
    /// Build an entry from a ranked station.
    pub fn from_ranked(ranked: &RankedStation) -> Self {
        Self {
            charger: ChargerView::from_station(&ranked.station),
            distance_km: ranked.distance_km,
        }
    }
}

/// Response for the nearby ranking.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    /// Whether a reference position was available.
    ///
    /// `false` with an empty list means "no location yet", as opposed to
    /// "no chargers near you".
    pub located: bool,

    /// Ranked chargers, nearest first
    pub chargers: Vec<NearbyEntry>,
}

/// A reported geolocation fix, in the browser geolocation shape.
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Accuracy radius in meters (defaults to 0 when the provider omits it)
    pub accuracy: Option<f64>,
}

/// Response to a reported fix.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    /// Names of the geofences the fix falls inside
    pub geofences: Vec<String>,
}

/// Response for a registry sync.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Human-readable summary
    pub message: String,

    /// Number of chargers stored
    pub synced: usize,

    /// Number of stale chargers dropped
    pub deleted: usize,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
