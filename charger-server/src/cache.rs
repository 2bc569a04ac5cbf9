//! Caching layer for Open Charge Map responses.
//!
//! Registry data changes on the order of days, while a manual sync can be
//! triggered at any time. Caching the per-country POI responses bounds how
//! often the upstream is actually hit without making the directory stale.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::CountryCode;
use crate::ocm::{OcmClient, OcmError, Poi};

/// Cached per-country POI list.
type PoiEntry = Arc<Vec<Poi>>;

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 16,
        }
    }
}

/// Cache for registry responses, keyed by country code.
pub struct OcmCache {
    pois: MokaCache<CountryCode, PoiEntry>,
}

impl OcmCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let pois = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { pois }
    }

    /// Get a cached country entry.
    pub async fn get(&self, country: &CountryCode) -> Option<PoiEntry> {
        self.pois.get(country).await
    }

    /// Insert a country entry into the cache.
    pub async fn insert(&self, country: CountryCode, entry: PoiEntry) {
        self.pois.insert(country, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.pois.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.pois.invalidate_all();
    }
}

/// Registry client with caching.
///
/// Wraps an `OcmClient` and caches per-country POI responses.
pub struct CachedOcmClient {
    client: OcmClient,
    cache: OcmCache,
}

impl CachedOcmClient {
    /// Create a new cached client.
    pub fn new(client: OcmClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: OcmCache::new(cache_config),
        }
    }

    /// Fetch the POIs for a country, using the cache if available.
    pub async fn fetch_pois(&self, country: CountryCode) -> Result<PoiEntry, OcmError> {
        if let Some(cached) = self.cache.get(&country).await {
            return Ok(cached);
        }

        let pois = self.client.fetch_pois(country).await?;
        let entry = Arc::new(pois);

        self.cache.insert(country, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &OcmClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries, forcing the next fetch to hit the API.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
