use crate::constants::DEFAULT_KEY_POINT_COUNT;
use crate::models::{ActivityType, Coordinates};
use serde::{Deserialize, Serialize};

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub trip_type: String,
}

impl PlanRouteRequest {
    /// Returns the trimmed location and the parsed activity type.
    pub fn validate(&self) -> Result<(&str, ActivityType), String> {
        let location = self.location.trim();
        let activity = self.trip_type.parse::<ActivityType>().ok();
        match (location.is_empty(), activity) {
            (false, Some(activity)) => Ok((location, activity)),
            _ => Err("Please provide location and type (bike|trek)".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: String,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub weathercode: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub coords: Vec<Coordinates>,
    pub day_distances: Vec<f64>,
    pub weather: Vec<DailyForecast>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct PlacesRequest {
    pub coords: Vec<Coordinates>,
    #[serde(default = "default_key_point_count")]
    pub count: usize,
}

fn default_key_point_count() -> usize {
    DEFAULT_KEY_POINT_COUNT
}

impl PlacesRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.coords.is_empty() {
            return Err("coords must not be empty".to_string());
        }
        if !(1..=50).contains(&self.count) {
            return Err("count must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub key_points: Vec<Coordinates>,
    pub place_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_request_validation() {
        let request: PlanRouteRequest =
            serde_json::from_str(r#"{"location": " Bern ", "type": "bike"}"#).unwrap();
        assert_eq!(request.validate().unwrap(), ("Bern", ActivityType::Bike));

        let missing_type: PlanRouteRequest =
            serde_json::from_str(r#"{"location": "Bern"}"#).unwrap();
        assert!(missing_type.validate().is_err());

        let blank: PlanRouteRequest =
            serde_json::from_str(r#"{"location": "  ", "type": "trek"}"#).unwrap();
        assert!(blank.validate().is_err());

        let unknown: PlanRouteRequest =
            serde_json::from_str(r#"{"location": "Bern", "type": "kayak"}"#).unwrap();
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_places_request_defaults() {
        let request: PlacesRequest =
            serde_json::from_str(r#"{"coords": [[7.44, 46.95], [7.45, 46.96]]}"#).unwrap();
        assert_eq!(request.count, DEFAULT_KEY_POINT_COUNT);
        assert!(request.validate().is_ok());

        let empty: PlacesRequest = serde_json::from_str(r#"{"coords": []}"#).unwrap();
        assert!(empty.validate().is_err());
    }
}
