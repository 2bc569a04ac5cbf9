//! Mock Open Charge Map client for testing without API access.
//!
//! Loads sample POI payloads from JSON files and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::CountryCode;

use super::error::OcmError;
use super::types::Poi;

/// Mock client that serves POI data from JSON files.
///
/// This is useful for development and testing without real API credentials.
#[derive(Debug, Clone)]
pub struct MockOcmClient {
    /// Pre-loaded POI lists, keyed by country code.
    pois: HashMap<CountryCode, Vec<Poi>>,
}

impl MockOcmClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{CC}.json` (e.g., `RS.json`, `BA.json`), each
    /// containing a POI array in the live response shape.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, OcmError> {
        let data_dir = data_dir.as_ref();
        let mut pois = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| OcmError::Fixture {
            message: format!("failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| OcmError::Fixture {
                message: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract the country code from the filename ("RS.json" -> "RS")
            let code_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| OcmError::Fixture {
                        message: format!("invalid filename: {:?}", path),
                    })?;

            let country = CountryCode::parse(code_str).map_err(|_| OcmError::Fixture {
                message: format!("invalid country code in filename: {}", code_str),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| OcmError::Fixture {
                message: format!("failed to read {:?}: {}", path, e),
            })?;

            let parsed: Vec<Poi> = serde_json::from_str(&json).map_err(|e| OcmError::Json {
                message: format!("failed to parse {:?}: {}", path, e),
            })?;

            pois.insert(country, parsed);
        }

        Ok(Self { pois })
    }

    /// Create a mock client from in-memory data.
    pub fn from_map(pois: HashMap<CountryCode, Vec<Poi>>) -> Self {
        Self { pois }
    }

    /// Fetch the fixture POIs for a country.
    ///
    /// A country without a fixture behaves like an empty registry response
    /// rather than an error, matching a live query for a country with no
    /// recorded chargers.
    pub async fn fetch_pois(&self, country: CountryCode) -> Result<Vec<Poi>, OcmError> {
        Ok(self.pois.get(&country).cloned().unwrap_or_default())
    }
}
