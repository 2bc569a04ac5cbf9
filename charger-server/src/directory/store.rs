//! In-memory station store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::Station;

/// Result of replacing the directory contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Number of stations now stored.
    pub stored: usize,

    /// Number of previously-stored charger ids absent from the new list.
    pub removed: usize,
}

/// Thread-safe charging-station directory.
///
/// The station list is replaced wholesale on each sync; readers hold cheap
/// `Arc` snapshots, so an in-flight ranking never observes a partial
/// refresh.
#[derive(Clone, Default)]
pub struct StationDirectory {
    inner: Arc<RwLock<DirectoryState>>,
}

#[derive(Default)]
struct DirectoryState {
    stations: Arc<Vec<Station>>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored stations wholesale.
    ///
    /// Returns how many stations are now stored and how many previously
    /// known charger ids disappeared (stale entries, mirroring the
    /// upstream registry dropping a charger).
    pub async fn replace(&self, stations: Vec<Station>) -> ReplaceOutcome {
        let new_ids: HashSet<String> = stations
            .iter()
            .filter_map(|s| s.id.as_ref().map(|id| id.as_str().to_string()))
            .collect();

        let mut guard = self.inner.write().await;

        let removed = guard
            .stations
            .iter()
            .filter_map(|s| s.id.as_ref())
            .filter(|id| !new_ids.contains(id.as_str()))
            .count();

        let stored = stations.len();
        guard.stations = Arc::new(stations);
        guard.last_refreshed = Some(Utc::now());

        ReplaceOutcome { stored, removed }
    }

    /// A shared snapshot of the current station list.
    pub async fn snapshot(&self) -> Arc<Vec<Station>> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.stations)
    }

    /// Stations in the given town (exact match on the normalized name).
    pub async fn by_town(&self, town: &str) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard
            .stations
            .iter()
            .filter(|s| s.town == town)
            .cloned()
            .collect()
    }

    /// Number of stored stations.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.stations.len()
    }

    /// Whether the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.stations.is_empty()
    }

    /// When the directory was last replaced, if ever.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        let guard = self.inner.read().await;
        guard.last_refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChargerId, ChargerStatus};

    fn station(id: Option<&str>, town: &str) -> Station {
        Station {
            id: id.and_then(|s| ChargerId::parse(s).ok()),
            title: None,
            town: town.to_string(),
            latitude: Some(44.0),
            longitude: Some(20.0),
            status: ChargerStatus::Available,
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let dir = StationDirectory::new();
        assert!(dir.is_empty().await);
        assert_eq!(dir.len().await, 0);
        assert!(dir.last_refreshed().await.is_none());
        assert!(dir.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn replace_stores_and_stamps() {
        let dir = StationDirectory::new();

        let outcome = dir
            .replace(vec![station(Some("1"), "Belgrade"), station(Some("2"), "Novi Sad")])
            .await;

        assert_eq!(outcome, ReplaceOutcome { stored: 2, removed: 0 });
        assert_eq!(dir.len().await, 2);
        assert!(dir.last_refreshed().await.is_some());
    }

    #[tokio::test]
    async fn replace_counts_stale_ids() {
        let dir = StationDirectory::new();
        dir.replace(vec![
            station(Some("1"), "Belgrade"),
            station(Some("2"), "Belgrade"),
            station(None, "Belgrade"),
        ])
        .await;

        // "2" disappears, "3" is new; the id-less station never counts.
        let outcome = dir
            .replace(vec![station(Some("1"), "Belgrade"), station(Some("3"), "Belgrade")])
            .await;

        assert_eq!(outcome.stored, 2);
        assert_eq!(outcome.removed, 1);
    }

    #[tokio::test]
    async fn by_town_is_exact_match() {
        let dir = StationDirectory::new();
        dir.replace(vec![
            station(Some("1"), "Belgrade"),
            station(Some("2"), "Banja Luka"),
            station(Some("3"), "Belgrade"),
        ])
        .await;

        assert_eq!(dir.by_town("Belgrade").await.len(), 2);
        assert_eq!(dir.by_town("Banja Luka").await.len(), 1);
        assert!(dir.by_town("belgrade").await.is_empty());
        assert!(dir.by_town("Pristina").await.is_empty());
    }

    #[tokio::test]
    async fn snapshot_survives_replacement() {
        let dir = StationDirectory::new();
        dir.replace(vec![station(Some("1"), "Belgrade")]).await;

        let before = dir.snapshot().await;
        dir.replace(vec![]).await;

        // The old snapshot still holds the data it was taken with.
        assert_eq!(before.len(), 1);
        assert!(dir.is_empty().await);
    }
}
