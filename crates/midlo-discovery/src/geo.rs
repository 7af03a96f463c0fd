//! Great-circle distance and fallback search-center geometry.

use midlo_core::Coordinate;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude, constant over the globe to within ~0.5%.
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Haversine great-circle distance between two coordinates, in meters.
#[must_use]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// The center itself plus eight compass-shifted points at roughly
/// `offset_meters` along each cardinal axis.
///
/// Meters→degrees uses the flat approximation
/// `meters_per_deg_lng = meters_per_deg_lat × cos(lat)`, floored at 1.0 so
/// extreme latitudes don't divide by ~zero. Good enough for shifting a
/// search window; nothing downstream measures distance with these.
#[must_use]
pub fn fallback_centers(center: Coordinate, offset_meters: u32) -> Vec<Coordinate> {
    let lat_rad = center.lat.to_radians();
    let meters_per_deg_lng = (METERS_PER_DEG_LAT * lat_rad.cos()).max(1.0);
    let d_lat = f64::from(offset_meters) / METERS_PER_DEG_LAT;
    let d_lng = f64::from(offset_meters) / meters_per_deg_lng;

    vec![
        center,
        Coordinate::new(center.lat + d_lat, center.lng),
        Coordinate::new(center.lat - d_lat, center.lng),
        Coordinate::new(center.lat, center.lng + d_lng),
        Coordinate::new(center.lat, center.lng - d_lng),
        Coordinate::new(center.lat + d_lat, center.lng + d_lng),
        Coordinate::new(center.lat + d_lat, center.lng - d_lng),
        Coordinate::new(center.lat - d_lat, center.lng + d_lng),
        Coordinate::new(center.lat - d_lat, center.lng - d_lng),
    ]
}

/// Collapses exact-duplicate centers (rings can coincide at extreme
/// latitudes), preserving first-seen order.
#[must_use]
pub fn dedup_centers(centers: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut seen = std::collections::HashSet::new();
    centers
        .into_iter()
        .filter(|c| seen.insert((c.lat.to_bits(), c.lng.to_bits())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // Minneapolis to St Paul city halls, roughly 14.9 km.
        let mpls = Coordinate::new(44.9778, -93.2650);
        let stp = Coordinate::new(44.9442, -93.0936);
        let d = haversine_meters(mpls, stp);
        assert!((13_000.0..16_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = Coordinate::new(10.0, 20.0);
        assert!(haversine_meters(p, p) < 1e-6);
    }

    #[test]
    fn fallback_ring_has_nine_distinct_points() {
        let center = Coordinate::new(44.95, -93.1);
        let ring = dedup_centers(fallback_centers(center, 35_000));
        assert_eq!(ring.len(), 9);
        assert_eq!(ring[0], center);
    }

    #[test]
    fn cardinal_points_sit_at_the_requested_offset() {
        let center = Coordinate::new(44.95, -93.1);
        let offset = 35_000.0;
        let ring = fallback_centers(center, 35_000);

        // Points 1-4 are the cardinal shifts.
        for point in &ring[1..5] {
            let d = haversine_meters(center, *point);
            let error = (d - offset).abs() / offset;
            assert!(error < 0.01, "cardinal offset {d} vs {offset}");
        }
    }

    #[test]
    fn diagonal_points_sit_at_sqrt_two_times_the_offset() {
        let center = Coordinate::new(44.95, -93.1);
        let expected = 35_000.0 * std::f64::consts::SQRT_2;
        let ring = fallback_centers(center, 35_000);

        for point in &ring[5..9] {
            let d = haversine_meters(center, *point);
            let error = (d - expected).abs() / expected;
            assert!(error < 0.01, "diagonal offset {d} vs {expected}");
        }
    }

    #[test]
    fn dedup_collapses_identical_centers() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);
        let deduped = dedup_centers(vec![a, b, a, a, b]);
        assert_eq!(deduped, vec![a, b]);
    }
}
