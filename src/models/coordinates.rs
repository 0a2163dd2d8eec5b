use crate::services::trip_planner::geodesy;
use serde::{Deserialize, Serialize};

/// A WGS84 position. Serialized in GeoJSON order as `[lng, lat]`, which is
/// what the routing backend and the map front end both speak.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lng, lat })
    }

    /// Build from a GeoJSON position (`[lng, lat, ...]`), ignoring any altitude.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Coordinates::new(*lng, *lat).ok(),
            _ => None,
        }
    }

    /// Great-circle distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        geodesy::great_circle_distance_km(self, other)
    }

    /// Round coordinates to specified decimal places for caching
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lng: (self.lng * multiplier).round() / multiplier,
            lat: (self.lat * multiplier).round() / multiplier,
        }
    }
}

impl TryFrom<[f64; 2]> for Coordinates {
    type Error = String;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinates::new(lng, lat)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lng, c.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(2.3522, 48.8566).is_ok());
        assert!(Coordinates::new(0.0, 91.0).is_err()); // Invalid lat
        assert!(Coordinates::new(181.0, 0.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_distance_calculation() {
        let paris = Coordinates::new(2.3522, 48.8566).unwrap();
        let london = Coordinates::new(-0.1278, 51.5074).unwrap();

        let distance = paris.distance_to(&london);
        // Paris to London is approximately 344 km
        assert!((distance - 344.0).abs() < 10.0);
    }

    #[test]
    fn test_rounding() {
        let coords = Coordinates::new(2.352222, 48.856614).unwrap();
        let rounded = coords.round(3);
        assert_eq!(rounded.lat, 48.857);
        assert_eq!(rounded.lng, 2.352);
    }

    #[test]
    fn test_serializes_as_lng_lat_pair() {
        let coords = Coordinates::new(7.4474, 46.9480).unwrap();
        let json = serde_json::to_string(&coords).unwrap();
        assert_eq!(json, "[7.4474,46.948]");

        let parsed: Coordinates = serde_json::from_str("[7.4474,46.948]").unwrap();
        assert_eq!(parsed, coords);

        assert!(serde_json::from_str::<Coordinates>("[7.4474,146.948]").is_err());
    }

    #[test]
    fn test_from_position() {
        let with_altitude = Coordinates::from_position(&[8.5, 47.3, 410.0]).unwrap();
        assert_eq!(with_altitude, Coordinates { lng: 8.5, lat: 47.3 });
        assert!(Coordinates::from_position(&[8.5]).is_none());
        assert!(Coordinates::from_position(&[8.5, 95.0]).is_none());
    }
}
