//! Distance arithmetic on geographic coordinates.
//!
//! Two metrics are provided: a cheap equirectangular approximation used for
//! ranking nearby stations, and the haversine great-circle distance used
//! where accuracy matters more than speed (geofence containment).

use crate::domain::Coordinates;

/// Kilometers per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Equirectangular-approximation distance in kilometers.
///
/// Projects the two points onto a plane: the latitude delta maps directly
/// to kilometers, the longitude delta is scaled by the cosine of the
/// reference latitude (`from`) to correct for meridian convergence, and the
/// result is the Euclidean norm of the two components.
///
/// Valid over short spans (tens of kilometers); error grows with distance
/// and near the poles. Use [`haversine_km`] when accuracy matters.
pub fn equirectangular_km(from: Coordinates, to: Coordinates) -> f64 {
    let dlat_km = (to.latitude - from.latitude) * KM_PER_DEG_LAT;
    let dlon_km = (to.longitude - from.longitude) * KM_PER_DEG_LAT * from.latitude.to_radians().cos();
    (dlat_km * dlat_km + dlon_km * dlon_km).sqrt()
}

/// Haversine great-circle distance in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_distance_at_same_point() {
        let p = Coordinates::new(44.7866, 20.4489);
        assert_eq!(equirectangular_km(p, p), 0.0);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // A pure latitude delta is the same in both metrics.
        let a = Coordinates::new(44.0, 20.0);
        let b = Coordinates::new(45.0, 20.0);
        assert_relative_eq!(equirectangular_km(a, b), 111.32, max_relative = 1e-9);
        assert_relative_eq!(haversine_km(a, b), 111.19, max_relative = 1e-3);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        // One degree of longitude spans fewer kilometers away from the equator.
        let at_equator = equirectangular_km(
            Coordinates::new(0.0, 20.0),
            Coordinates::new(0.0, 21.0),
        );
        let at_belgrade = equirectangular_km(
            Coordinates::new(44.7866, 20.0),
            Coordinates::new(44.7866, 21.0),
        );
        assert_relative_eq!(at_equator, 111.32, max_relative = 1e-9);
        assert!(at_belgrade < at_equator);
        assert_relative_eq!(
            at_belgrade,
            111.32 * 44.7866f64.to_radians().cos(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn metrics_agree_over_short_spans() {
        // Belgrade city centre to Zemun, roughly 9 km.
        let centre = Coordinates::new(44.7866, 20.4489);
        let zemun = Coordinates::new(44.8458, 20.4012);

        let approx_km = equirectangular_km(centre, zemun);
        let exact_km = haversine_km(centre, zemun);

        assert_relative_eq!(approx_km, exact_km, max_relative = 0.01);
    }

    #[test]
    fn haversine_known_distance() {
        // Belgrade to Banja Luka is roughly 260 km great-circle.
        let belgrade = Coordinates::new(44.7866, 20.4489);
        let banja_luka = Coordinates::new(44.7722, 17.1910);

        let d = haversine_km(belgrade, banja_luka);
        assert!((255.0..265.0).contains(&d), "got {d}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord_strategy() -> impl Strategy<Value = Coordinates> {
        (-85.0f64..85.0, -180.0f64..180.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
    }

    proptest! {
        /// Distances are never negative.
        #[test]
        fn non_negative(a in coord_strategy(), b in coord_strategy()) {
            prop_assert!(equirectangular_km(a, b) >= 0.0);
            prop_assert!(haversine_km(a, b) >= 0.0);
        }

        /// Haversine is symmetric in its arguments.
        #[test]
        fn haversine_symmetric(a in coord_strategy(), b in coord_strategy()) {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// A point is at distance zero from itself.
        #[test]
        fn identity(p in coord_strategy()) {
            prop_assert_eq!(equirectangular_km(p, p), 0.0);
            prop_assert!(haversine_km(p, p) < 1e-9);
        }
    }
}
