//! Charging station types.

use std::fmt;

use super::Coordinates;

/// Error returned when parsing an invalid charger identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid charger id: {reason}")]
pub struct InvalidChargerId {
    reason: &'static str,
}

/// A charging station identifier as assigned by the upstream registry.
///
/// Identifiers are opaque non-empty strings (the upstream uses numeric IDs,
/// but nothing downstream relies on that). This type guarantees that any
/// `ChargerId` value is non-empty and free of surrounding whitespace.
///
/// # Examples
///
/// ```
/// use charger_server::domain::ChargerId;
///
/// let id = ChargerId::parse("141773").unwrap();
/// assert_eq!(id.as_str(), "141773");
///
/// // Empty and whitespace-only inputs are rejected
/// assert!(ChargerId::parse("").is_err());
/// assert!(ChargerId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChargerId(String);

impl ChargerId {
    /// Parse a charger identifier from a string.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be non-empty.
    pub fn parse(s: &str) -> Result<Self, InvalidChargerId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidChargerId {
                reason: "must be non-empty",
            });
        }
        Ok(ChargerId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChargerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChargerId({})", self.0)
    }
}

impl fmt::Display for ChargerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operational status of a charging station.
///
/// The upstream registry reports an `IsOperational` flag; stations without
/// one are `Unknown` rather than assumed available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChargerStatus {
    /// The station is reported operational.
    Available,
    /// The station is reported out of service.
    Offline,
    /// No status information from the upstream.
    #[default]
    Unknown,
}

impl ChargerStatus {
    /// Map the upstream operational flag to a status.
    pub fn from_operational(is_operational: Option<bool>) -> Self {
        match is_operational {
            Some(true) => ChargerStatus::Available,
            Some(false) => ChargerStatus::Offline,
            None => ChargerStatus::Unknown,
        }
    }

    /// Parse a status from its display label (case-insensitive).
    ///
    /// Unrecognised labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "available" => ChargerStatus::Available,
            "offline" => ChargerStatus::Offline,
            _ => ChargerStatus::Unknown,
        }
    }

    /// Returns the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargerStatus::Available => "Available",
            ChargerStatus::Offline => "Offline",
            ChargerStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChargerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A charging station record.
///
/// Stations are immutable once converted from the upstream payload; the
/// directory replaces the whole list on each refresh rather than mutating
/// entries in place.
///
/// Coordinates are optional because the upstream occasionally omits them.
/// A coordinate of exactly `0.0` is valid (a station at the equator or the
/// prime meridian is a real place); only an absent value makes a station
/// ineligible for distance ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Upstream identifier, when the registry assigned one.
    pub id: Option<ChargerId>,

    /// Display title.
    pub title: Option<String>,

    /// Normalized town name ("Unknown" when the upstream has none).
    pub town: String,

    /// Latitude in degrees.
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    pub longitude: Option<f64>,

    /// Operational status.
    pub status: ChargerStatus,
}

impl Station {
    /// Returns the station's coordinates if both components are present.
    ///
    /// This is the eligibility check for distance ranking: `None` means the
    /// station cannot be ranked, never that it sits at (0, 0).
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}
