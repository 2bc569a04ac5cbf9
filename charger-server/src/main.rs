use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use charger_server::cache::{CacheConfig, CachedOcmClient};
use charger_server::directory::{
    DirectoryCache, DirectoryCacheConfig, StationDirectory, SyncConfig, sync_directory,
};
use charger_server::domain::Coordinates;
use charger_server::ocm::{OcmClient, OcmConfig};
use charger_server::tracker::{DEFAULT_NEARBY_LIMIT, Geofence, NearbyTracker, PositionFeed};
use charger_server::web::{AppState, create_router};

/// How often to refresh the station directory (12 hours).
const SYNC_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);

/// Center of the Jahorina geofence.
const JAHORINA: (f64, f64) = (43.7385239, 18.5635638);

/// Radius of the Jahorina geofence in kilometers.
const JAHORINA_RADIUS_KM: f64 = 7.0;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get credentials from environment
    let api_key = std::env::var("OCM_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: OCM_API_KEY not set. Registry requests may be rejected.");
        String::new()
    });

    // Create the registry client
    let mut ocm_config = OcmConfig::new(&api_key);
    if let Ok(url) = std::env::var("OCM_URL") {
        ocm_config = ocm_config.with_base_url(url);
    }
    let ocm_client = OcmClient::new(ocm_config).expect("Failed to create OCM client");
    let ocm = Arc::new(CachedOcmClient::new(ocm_client, &CacheConfig::default()));

    let directory = StationDirectory::new();
    let sync_config = SyncConfig::default();

    // Seed from the disk cache so a restart serves chargers immediately
    let disk_cache = DirectoryCache::new(DirectoryCacheConfig::default());
    if let Some(stations) = disk_cache.load() {
        let outcome = directory.replace(stations).await;
        println!("Loaded {} chargers from disk cache", outcome.stored);
    }

    // Initial sync. Failure is not fatal: the API degrades to an empty
    // list and POST /api/sync can retry later.
    if directory.is_empty().await {
        println!("Syncing chargers from Open Charge Map...");
        match sync_directory(ocm.as_ref(), &directory, &sync_config).await {
            Ok(outcome) => {
                println!("Synced {} chargers", outcome.synced);
                if let Err(e) = disk_cache.save(&directory.snapshot().await) {
                    eprintln!("Warning: failed to write directory cache: {e}");
                }
            }
            Err(e) => eprintln!("Warning: initial sync failed: {e}"),
        }
    }

    // Spawn background task to refresh the directory periodically
    {
        let ocm = ocm.clone();
        let directory = directory.clone();
        let sync_config = sync_config.clone();
        let disk_cache = disk_cache.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SYNC_INTERVAL);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                ocm.invalidate_cache();
                match sync_directory(ocm.as_ref(), &directory, &sync_config).await {
                    Ok(outcome) => {
                        tracing::info!(
                            synced = outcome.synced,
                            removed = outcome.removed,
                            "refreshed station directory"
                        );
                        if let Err(e) = disk_cache.save(&directory.snapshot().await) {
                            tracing::warn!("failed to write directory cache: {e}");
                        }
                    }
                    Err(e) => tracing::warn!("directory refresh failed: {e}"),
                }
            }
        });
    }

    // Position feed -> tracker controller: on each fix, refresh the
    // tracker's inputs so its nearby ranking follows the user around.
    let feed = Arc::new(PositionFeed::new());
    let tracker = Arc::new(RwLock::new(NearbyTracker::new(DEFAULT_NEARBY_LIMIT)));
    {
        let mut positions = feed.subscribe();
        let tracker = tracker.clone();
        let directory = directory.clone();
        tokio::spawn(async move {
            while positions.changed().await.is_ok() {
                let position = *positions.borrow_and_update();
                let stations = directory.snapshot().await;

                let mut guard = tracker.write().await;
                if let Some(position) = position {
                    guard.set_position(position);
                }
                guard.set_stations(stations);
                tracing::debug!(nearby = guard.nearby().len(), "position update applied");
            }
        });
    }

    let geofences = vec![Geofence::new(
        "jahorina",
        Coordinates::new(JAHORINA.0, JAHORINA.1),
        JAHORINA_RADIUS_KM,
    )];

    // Build app state
    let state = AppState::new(ocm, directory, sync_config, feed, tracker, geofences);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Charger map server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health               - Health check");
    println!("  GET  /api/chargers         - List chargers (optional ?town=)");
    println!("  GET  /api/chargers/nearby  - Rank chargers by distance");
    println!("  POST /api/position         - Report a geolocation fix");
    println!("  POST /api/sync             - Refresh from Open Charge Map");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
