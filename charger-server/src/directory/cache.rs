//! Disk-based cache for the converted station list.
//!
//! Lets a restarted server serve chargers immediately instead of waiting
//! for the first registry sync.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::{ChargerId, ChargerStatus, Station};

use super::error::DirectoryError;

/// Default cache TTL: 2 days, matching the upstream data's useful lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Cached station list with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedChargers {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// The cached station records.
    chargers: Vec<CachedCharger>,
}

/// On-disk station record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedCharger {
    charger_id: Option<String>,
    title: Option<String>,
    town: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
}

impl CachedCharger {
    fn from_station(station: &Station) -> Self {
        Self {
            charger_id: station.id.as_ref().map(|id| id.as_str().to_string()),
            title: station.title.clone(),
            town: station.town.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            status: station.status.to_string(),
        }
    }

    fn into_station(self) -> Station {
        Station {
            id: self.charger_id.and_then(|s| ChargerId::parse(&s).ok()),
            title: self.title,
            town: self.town,
            latitude: self.latitude,
            longitude: self.longitude,
            status: ChargerStatus::from_label(&self.status),
        }
    }
}

/// Configuration for the directory disk cache.
#[derive(Debug, Clone)]
pub struct DirectoryCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl DirectoryCacheConfig {
    /// Create a new cache config with the given path and default TTL (2 days).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for DirectoryCacheConfig {
    fn default() -> Self {
        // Default to a cache file in the current directory
        Self::new("chargers_cache.json")
    }
}

/// Disk cache for station data.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    config: DirectoryCacheConfig,
}

impl DirectoryCache {
    /// Create a new directory cache with the given config.
    pub fn new(config: DirectoryCacheConfig) -> Self {
        Self { config }
    }

    /// The cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Try to load stations from the cache.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<Vec<Station>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedChargers = serde_json::from_str(&contents).ok()?;

        // Check if cache has expired
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(
            cached
                .chargers
                .into_iter()
                .map(CachedCharger::into_station)
                .collect(),
        )
    }

    /// Save stations to the cache.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[Station]) -> Result<(), DirectoryError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| DirectoryError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedChargers {
            cached_at_secs: now,
            chargers: stations.iter().map(CachedCharger::from_station).collect(),
        };

        let json = serde_json::to_string(&cached).map_err(|e| DirectoryError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DirectoryError::Cache {
                    message: format!("failed to create cache directory: {}", e),
                })?;
            }
        }

        std::fs::write(&self.config.path, json).map_err(|e| DirectoryError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }
}
