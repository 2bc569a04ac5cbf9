//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CachedOcmClient;
use crate::directory::{StationDirectory, SyncConfig};
use crate::tracker::{Geofence, NearbyTracker, PositionFeed};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached registry client
    pub ocm: Arc<CachedOcmClient>,

    /// Station directory (already a cheap-clone handle)
    pub directory: StationDirectory,

    /// Registry sync configuration
    pub sync_config: Arc<SyncConfig>,

    /// Geolocation fix feed
    pub feed: Arc<PositionFeed>,

    /// Nearby-station view state, updated by the feed observer
    pub tracker: Arc<RwLock<NearbyTracker>>,

    /// Configured geofences
    pub geofences: Arc<Vec<Geofence>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        ocm: Arc<CachedOcmClient>,
        directory: StationDirectory,
        sync_config: SyncConfig,
        feed: Arc<PositionFeed>,
        tracker: Arc<RwLock<NearbyTracker>>,
        geofences: Vec<Geofence>,
    ) -> Self {
        Self {
            ocm,
            directory,
            sync_config: Arc::new(sync_config),
            feed,
            tracker,
            geofences: Arc::new(geofences),
        }
    }
}
