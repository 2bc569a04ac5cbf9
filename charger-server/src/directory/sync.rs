//! Registry sync for the station directory.
//!
//! Pulls per-country POI lists from the registry, applies the coverage
//! policy, converts to domain stations, and replaces the directory
//! wholesale.

use futures::future::join_all;
use tracing::debug;

use crate::cache::CachedOcmClient;
use crate::domain::CountryCode;
use crate::ocm::{MockOcmClient, OcmClient, OcmError, Poi, convert_pois};

use super::store::StationDirectory;

/// Bosnia and Herzegovina, the one country whose results are filtered.
const BOSNIA: &str = "BA";

/// Towns in Republika Srpska (and Brčko District) used to keep BA records
/// whose StateOrProvince field doesn't name the entity.
const RS_TOWNS: &[&str] = &[
    "Banja Luka",
    "Bijeljina",
    "Prijedor",
    "Doboj",
    "Trebinje",
    "Zvornik",
    "Gradiška",
    "Laktaši",
    "Istočno Sarajevo",
    "Pale",
    "Foča",
    "Višegrad",
    "Derventa",
    "Modriča",
    "Prnjavor",
    "Mrkonjić Grad",
    "Bileća",
    "Rogatica",
    "Sokolac",
    "Šipovo",
    "Čelinac",
    "Bratunac",
    "Kozarska Dubica",
    "Novi Grad",
    "Teslić",
    "Brod",
    "Šamac",
    "Ugljevik",
    "Vlasenica",
    "Nevesinje",
    "Brčko",
    "Brcko",
    "Dabrac",
    "Jahorina",
];

/// Trait for providing registry POIs.
///
/// This abstraction allows the sync to be tested with mock data.
pub trait PoiSource {
    /// Fetch all POIs for a country.
    fn pois_for(
        &self,
        country: CountryCode,
    ) -> impl std::future::Future<Output = Result<Vec<Poi>, OcmError>> + Send;
}

impl PoiSource for OcmClient {
    async fn pois_for(&self, country: CountryCode) -> Result<Vec<Poi>, OcmError> {
        self.fetch_pois(country).await
    }
}

impl PoiSource for CachedOcmClient {
    async fn pois_for(&self, country: CountryCode) -> Result<Vec<Poi>, OcmError> {
        let entry = self.fetch_pois(country).await?;
        Ok(entry.as_ref().clone())
    }
}

impl PoiSource for MockOcmClient {
    async fn pois_for(&self, country: CountryCode) -> Result<Vec<Poi>, OcmError> {
        self.fetch_pois(country).await
    }
}

/// Configuration for the registry sync.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Countries to pull, in fetch order.
    pub countries: Vec<CountryCode>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        // Serbia, Kosovo, Bosnia and Herzegovina. The codes are static and
        // valid, so parse cannot fail here.
        let countries = ["RS", "XK", "BA"]
            .iter()
            .filter_map(|c| CountryCode::parse(c).ok())
            .collect();
        Self { countries }
    }
}

/// Result of a directory sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Number of stations stored.
    pub synced: usize,

    /// Number of previously-stored charger ids no longer present.
    pub removed: usize,
}

/// Sync the directory from the registry.
///
/// Countries are fetched concurrently; any fetch failure fails the whole
/// sync and leaves the directory untouched. BA results are filtered to
/// Republika Srpska and the Brčko District before conversion.
pub async fn sync_directory<S: PoiSource>(
    source: &S,
    directory: &StationDirectory,
    config: &SyncConfig,
) -> Result<SyncOutcome, OcmError> {
    let fetches = config.countries.iter().map(|&country| async move {
        let pois = source.pois_for(country).await?;
        Ok::<(CountryCode, Vec<Poi>), OcmError>((country, pois))
    });

    let mut all = Vec::new();
    for result in join_all(fetches).await {
        let (country, mut pois) = result?;
        let fetched = pois.len();

        if country.as_str() == BOSNIA {
            pois.retain(is_rs_or_brcko);
            debug!(
                country = %country,
                fetched,
                kept = pois.len(),
                "filtered registry records to Republika Srpska and Brčko"
            );
        } else {
            debug!(country = %country, fetched, "fetched registry records");
        }

        all.extend(pois);
    }

    let stations = convert_pois(&all);
    let outcome = directory.replace(stations).await;

    Ok(SyncOutcome {
        synced: outcome.stored,
        removed: outcome.removed,
    })
}

/// Whether a BA record belongs to Republika Srpska or the Brčko District.
///
/// Keeps a record when its StateOrProvince mentions the entity, or when its
/// town name contains one of the known RS towns (case-insensitive, matching
/// the registry's inconsistent capitalization).
fn is_rs_or_brcko(poi: &Poi) -> bool {
    let addr = poi.address_info.as_ref();

    let state = addr
        .and_then(|a| a.state_or_province.as_deref())
        .unwrap_or("");
    if state.to_lowercase().contains("srpska") {
        return true;
    }

    let town = addr.and_then(|a| a.town.as_deref()).unwrap_or("");
    let town_lower = town.to_lowercase();
    RS_TOWNS
        .iter()
        .any(|t| town_lower.contains(&t.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocm::{AddressInfo, StatusType};
    use std::collections::HashMap;

    fn country(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn poi(id: i64, town: Option<&str>, state: Option<&str>) -> Poi {
        Poi {
            id: Some(id),
            address_info: Some(AddressInfo {
                title: Some(format!("Charger {id}")),
                town: town.map(str::to_string),
                state_or_province: state.map(str::to_string),
                postcode: None,
                latitude: Some(44.0),
                longitude: Some(19.0),
            }),
            status_type: Some(StatusType {
                is_operational: Some(true),
            }),
        }
    }

    fn mock(fixtures: &[(&str, Vec<Poi>)]) -> MockOcmClient {
        let map: HashMap<CountryCode, Vec<Poi>> = fixtures
            .iter()
            .map(|(c, pois)| (country(c), pois.clone()))
            .collect();
        MockOcmClient::from_map(map)
    }

    #[test]
    fn default_config_covers_three_countries() {
        let config = SyncConfig::default();
        let codes: Vec<&str> = config.countries.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["RS", "XK", "BA"]);
    }

    #[test]
    fn rs_filter_accepts_state_mention() {
        assert!(is_rs_or_brcko(&poi(1, None, Some("Republika Srpska"))));
        assert!(is_rs_or_brcko(&poi(2, None, Some("REPUBLIKA SRPSKA"))));
        assert!(is_rs_or_brcko(&poi(3, Some("Sarajevo"), Some("srpska"))));
    }

    #[test]
    fn rs_filter_accepts_known_towns() {
        assert!(is_rs_or_brcko(&poi(1, Some("Banja Luka"), None)));
        assert!(is_rs_or_brcko(&poi(2, Some("banja luka"), None)));
        // Substring containment, as the registry appends suffixes
        assert!(is_rs_or_brcko(&poi(3, Some("Istočno Sarajevo - Lukavica"), None)));
        assert!(is_rs_or_brcko(&poi(4, Some("Brčko"), None)));
    }

    #[test]
    fn rs_filter_rejects_federation_records() {
        assert!(!is_rs_or_brcko(&poi(1, Some("Sarajevo"), None)));
        assert!(!is_rs_or_brcko(&poi(2, Some("Mostar"), Some("Federacija BiH"))));
        assert!(!is_rs_or_brcko(&poi(3, None, None)));
    }

    #[tokio::test]
    async fn sync_merges_countries_and_filters_ba() {
        let source = mock(&[
            ("RS", vec![poi(1, Some("Beograd"), None), poi(2, Some("Novi Sad"), None)]),
            ("XK", vec![poi(3, Some("Pristina"), None)]),
            (
                "BA",
                vec![
                    poi(4, Some("Banja Luka"), None),
                    poi(5, Some("Sarajevo"), None),
                    poi(6, None, Some("Republika Srpska")),
                ],
            ),
        ]);

        let directory = StationDirectory::new();
        let outcome = sync_directory(&source, &directory, &SyncConfig::default())
            .await
            .unwrap();

        // Sarajevo (id 5) is dropped by the BA filter.
        assert_eq!(outcome, SyncOutcome { synced: 5, removed: 0 });
        assert_eq!(directory.len().await, 5);

        let snapshot = directory.snapshot().await;
        assert!(
            !snapshot
                .iter()
                .any(|s| s.id.as_ref().is_some_and(|id| id.as_str() == "5"))
        );
    }

    #[tokio::test]
    async fn sync_reports_removed_ids() {
        let directory = StationDirectory::new();

        let first = mock(&[("RS", vec![poi(1, None, None), poi(2, None, None)])]);
        let config = SyncConfig {
            countries: vec![country("RS")],
        };
        sync_directory(&first, &directory, &config).await.unwrap();

        let second = mock(&[("RS", vec![poi(2, None, None), poi(7, None, None)])]);
        let outcome = sync_directory(&second, &directory, &config).await.unwrap();

        assert_eq!(outcome, SyncOutcome { synced: 2, removed: 1 });
    }

    #[tokio::test]
    async fn sync_with_no_fixtures_empties_directory() {
        let directory = StationDirectory::new();
        let config = SyncConfig::default();

        let seeded = mock(&[("RS", vec![poi(1, None, None)])]);
        sync_directory(&seeded, &directory, &config).await.unwrap();

        let empty = mock(&[]);
        let outcome = sync_directory(&empty, &directory, &config).await.unwrap();

        assert_eq!(outcome, SyncOutcome { synced: 0, removed: 1 });
        assert!(directory.is_empty().await);
    }
}
