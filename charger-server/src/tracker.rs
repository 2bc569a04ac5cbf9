//! Live position tracking and nearby-station state.
//!
//! The location provider publishes fixes into a [`PositionFeed`]; a
//! [`NearbyTracker`] owns the view state the ranking is derived from (the
//! last fix, the last-loaded station list, and the result limit) and
//! re-invokes the ranker on demand. The state is explicit and injected,
//! not read from shared globals, so several trackers can observe the same
//! feed independently.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Coordinates, Station, UserPosition};
use crate::geo::haversine_km;
use crate::proximity::{RankedStation, rank};

/// Default number of nearby stations a tracker reports.
pub const DEFAULT_NEARBY_LIMIT: usize = 10;

/// A single-writer, many-reader feed of geolocation fixes.
///
/// Only the latest fix is retained; subscribers that fall behind see the
/// newest value, never a backlog.
pub struct PositionFeed {
    tx: watch::Sender<Option<UserPosition>>,
}

impl PositionFeed {
    /// Create a feed with no fix yet.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publish a new fix, replacing the previous one.
    pub fn publish(&self, position: UserPosition) {
        // Send only fails with no receivers; the feed's own handle keeps
        // `latest` working regardless, so the result is ignored.
        let _ = self.tx.send(Some(position));
    }

    /// Subscribe to fix updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserPosition>> {
        self.tx.subscribe()
    }

    /// The most recent fix, if any has been published.
    pub fn latest(&self) -> Option<UserPosition> {
        *self.tx.borrow()
    }
}

impl Default for PositionFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// View state for the nearby-station list.
///
/// Owns the inputs the ranking is computed from. `nearby` is recomputed on
/// each call rather than cached: the ranker is cheap, and the state only
/// changes through `set_position` / `set_stations` anyway.
#[derive(Debug, Clone)]
pub struct NearbyTracker {
    position: Option<UserPosition>,
    stations: Arc<Vec<Station>>,
    limit: usize,
}

impl NearbyTracker {
    /// Create a tracker with no position and no stations.
    pub fn new(limit: usize) -> Self {
        Self {
            position: None,
            stations: Arc::new(Vec::new()),
            limit,
        }
    }

    /// Record a new geolocation fix.
    pub fn set_position(&mut self, position: UserPosition) {
        self.position = Some(position);
    }

    /// Replace the station list (wholesale, on each data refresh).
    pub fn set_stations(&mut self, stations: Arc<Vec<Station>>) {
        self.stations = stations;
    }

    /// The last recorded fix.
    pub fn position(&self) -> Option<UserPosition> {
        self.position
    }

    /// The configured result limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The nearby stations, nearest first.
    ///
    /// Empty until both a fix and a station list are present.
    pub fn nearby(&self) -> Vec<RankedStation> {
        rank(self.position.as_ref(), &self.stations, self.limit)
    }
}

/// A named circular region on the map.
///
/// Containment uses the great-circle distance: fences are checked rarely
/// and a radius can sit anywhere on the globe, so the flat-plane shortcut
/// the ranker uses is not worth the error here.
#[derive(Debug, Clone)]
pub struct Geofence {
    /// Name reported when the fence triggers.
    pub name: String,

    /// Center of the fence.
    pub center: Coordinates,

    /// Radius in kilometers.
    pub radius_km: f64,
}

impl Geofence {
    /// Create a fence.
    pub fn new(name: impl Into<String>, center: Coordinates, radius_km: f64) -> Self {
        Self {
            name: name.into(),
            center,
            radius_km,
        }
    }

    /// Whether a fix falls strictly inside the fence.
    pub fn contains(&self, position: &UserPosition) -> bool {
        haversine_km(self.center, position.coordinates()) < self.radius_km
    }
}
