//! Nearest-station ranking.
//!
//! This module contains the core logic for ordering charging stations by
//! approximate distance from the user's position. It is pure: it never
//! fails and never mutates its inputs, so callers can re-run it on every
//! position or data refresh.

use crate::domain::{Station, UserPosition};
use crate::geo::equirectangular_km;

/// A station paired with its computed distance from the user.
#[derive(Debug, Clone)]
pub struct RankedStation {
    /// The station record.
    pub station: Station,

    /// Approximate distance from the user in kilometers.
    pub distance_km: f64,
}

/// Rank stations by approximate distance from the user, nearest first.
///
/// Stations without both coordinates are excluded before ranking; a
/// coordinate of exactly `0.0` is eligible, only an absent value excludes.
/// Distances use the equirectangular approximation, which is accurate over
/// the spans a map view cares about and cheaper than a great-circle
/// computation. Ties keep input order (the sort is stable).
///
/// Returns at most `limit` entries, sorted ascending by distance. A missing
/// user position or an empty station list yields an empty result, not an
/// error: "no location yet" versus "no data" is for the caller to surface.
pub fn rank(user: Option<&UserPosition>, stations: &[Station], limit: usize) -> Vec<RankedStation> {
    let Some(user) = user else {
        return Vec::new();
    };
    let origin = user.coordinates();

    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .filter_map(|station| {
            let coords = station.coordinates()?;
            Some(RankedStation {
                station: station.clone(),
                distance_km: equirectangular_km(origin, coords),
            })
        })
        .collect();

    // sort_by is stable, so equal distances keep input order
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);

    ranked
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::ChargerStatus;
    use proptest::prelude::*;

    /// Strategy for a station with possibly-missing coordinates.
    fn station_strategy() -> impl Strategy<Value = Station> {
        (
            proptest::option::of(-85.0f64..85.0),
            proptest::option::of(-180.0f64..180.0),
        )
            .prop_map(|(latitude, longitude)| Station {
                id: None,
                title: None,
                town: "Unknown".to_string(),
                latitude,
                longitude,
                status: ChargerStatus::Unknown,
            })
    }

    fn stations_strategy() -> impl Strategy<Value = Vec<Station>> {
        prop::collection::vec(station_strategy(), 0..30)
    }

    fn user_strategy() -> impl Strategy<Value = UserPosition> {
        (-85.0f64..85.0, -180.0f64..180.0, 0.0f64..500.0)
            .prop_map(|(lat, lon, acc)| UserPosition::new(lat, lon, acc))
    }

    proptest! {
        /// Output length is min(limit, eligible count).
        #[test]
        fn length_is_min_of_limit_and_eligible(
            user in user_strategy(),
            stations in stations_strategy(),
            limit in 0usize..40,
        ) {
            let eligible = stations.iter().filter(|s| s.coordinates().is_some()).count();
            let ranked = rank(Some(&user), &stations, limit);
            prop_assert_eq!(ranked.len(), limit.min(eligible));
        }

        /// Distances are non-decreasing.
        #[test]
        fn sorted_ascending(
            user in user_strategy(),
            stations in stations_strategy(),
            limit in 1usize..40,
        ) {
            let ranked = rank(Some(&user), &stations, limit);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }

        /// No station with a missing coordinate ever appears in the output.
        #[test]
        fn no_ineligible_station_in_output(
            user in user_strategy(),
            stations in stations_strategy(),
            limit in 1usize..40,
        ) {
            let ranked = rank(Some(&user), &stations, limit);
            for entry in &ranked {
                prop_assert!(entry.station.coordinates().is_some());
                prop_assert!(entry.distance_km >= 0.0);
            }
        }

        /// Missing user position always yields an empty result.
        #[test]
        fn no_position_is_empty(stations in stations_strategy(), limit in 0usize..40) {
            prop_assert!(rank(None, &stations, limit).is_empty());
        }
    }
}
