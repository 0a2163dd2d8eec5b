//! Spherical-earth geodesy used by route search and day splitting.
//!
//! Everything here works on a sphere of radius [`EARTH_RADIUS_KM`], which is
//! accurate to a few tenths of a percent at trip scale and keeps distances
//! consistent with the projections the bike search makes.

use crate::constants::EARTH_RADIUS_KM;
use crate::models::Coordinates;

/// Great-circle distance in kilometers (haversine formula).
pub fn great_circle_distance_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Point reached by travelling `distance_km` from `origin` along the great
/// circle with initial bearing `bearing_deg` (clockwise from true north).
///
/// Bearings outside `[0, 360)` are normalized first. The resulting longitude
/// is wrapped into `[-180, 180)`.
pub fn destination_point(origin: &Coordinates, distance_km: f64, bearing_deg: f64) -> Coordinates {
    let angular_distance = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.rem_euclid(360.0).to_radians();

    let start_lat = origin.lat.to_radians();
    let start_lng = origin.lng.to_radians();

    let sin_end_lat = start_lat.sin() * angular_distance.cos()
        + start_lat.cos() * angular_distance.sin() * bearing.cos();
    let end_lat = sin_end_lat.clamp(-1.0, 1.0).asin();

    let y = bearing.sin() * angular_distance.sin() * start_lat.cos();
    let x = angular_distance.cos() - start_lat.sin() * sin_end_lat;
    let end_lng = start_lng + y.atan2(x);

    Coordinates {
        lng: normalize_longitude(end_lng.to_degrees()),
        lat: end_lat.to_degrees(),
    }
}

fn normalize_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Running distance (km) along a path: `profile[0] == 0` and each entry adds
/// the great-circle length of the preceding segment.
pub fn cumulative_distances_km(path: &[Coordinates]) -> Vec<f64> {
    let mut profile = Vec::with_capacity(path.len());
    let mut total = 0.0;
    if !path.is_empty() {
        profile.push(0.0);
    }
    for window in path.windows(2) {
        total += great_circle_distance_km(&window[0], &window[1]);
        profile.push(total);
    }
    profile
}
