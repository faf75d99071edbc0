use crate::models::Location;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Signature of a distance function between two coordinates
///
/// The engines take this as a plain function pointer so tests can swap
/// in a simpler metric.
pub type DistanceFn = fn(&Location, &Location) -> f64;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(a: &Location, b: &Location) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Length of a route visiting `stops` in order
pub fn route_length(stops: &[Location], distance: DistanceFn) -> f64 {
    stops.windows(2).map(|leg| distance(&leg[0], &leg[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london = Location::new(51.5074, -0.1278);
        let paris = Location::new(48.8566, 2.3522);

        let distance = haversine_distance(&london, &paris);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = Location::new(50.5871, 8.6750);
        let b = Location::new(50.5800, 8.6900);
        assert!((haversine_distance(&a, &b) - haversine_distance(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_route_length() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 1.0);
        let c = Location::new(0.0, 2.0);

        let leg = haversine_distance(&a, &b);
        let total = route_length(&[a, b, c], haversine_distance);
        assert!((total - 2.0 * leg).abs() < 1e-6);
        assert_eq!(route_length(&[a], haversine_distance), 0.0);
    }
}
