use crate::constants::*;
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Travel mode understood by the routing backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    Walking,
    Cycling,
}

impl TravelProfile {
    /// Returns the OpenRouteService profile name for this travel mode
    pub fn ors_profile(&self) -> &'static str {
        match self {
            TravelProfile::Walking => "foot-hiking",
            TravelProfile::Cycling => "cycling-regular",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelProfile::Walking => write!(f, "walking"),
            TravelProfile::Cycling => write!(f, "cycling"),
        }
    }
}

/// Kind of trip a user plans. Each activity fixes its profile, day count and
/// per-day distance cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Trek,
    Bike,
}

impl ActivityType {
    pub fn profile(&self) -> TravelProfile {
        match self {
            ActivityType::Trek => TravelProfile::Walking,
            ActivityType::Bike => TravelProfile::Cycling,
        }
    }

    pub fn days(&self) -> usize {
        match self {
            ActivityType::Trek => TREK_DAYS,
            ActivityType::Bike => BIKE_DAYS,
        }
    }

    pub fn max_km_per_day(&self) -> f64 {
        match self {
            ActivityType::Trek => MAX_KM_PER_DAY_TREK,
            ActivityType::Bike => MAX_KM_PER_DAY_BIKE,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Trek => write!(f, "trek"),
            ActivityType::Bike => write!(f, "bike"),
        }
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trek" => Ok(ActivityType::Trek),
            "bike" => Ok(ActivityType::Bike),
            _ => Err(format!("Invalid activity type: '{}'", s)),
        }
    }
}

/// An ordered, non-empty path as produced by the routing backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route {
    coordinates: Vec<Coordinates>,
}

impl Route {
    /// Returns `None` for an empty geometry.
    pub fn new(coordinates: Vec<Coordinates>) -> Option<Self> {
        if coordinates.is_empty() {
            None
        } else {
            Some(Route { coordinates })
        }
    }

    pub fn coordinates(&self) -> &[Coordinates] {
        &self.coordinates
    }

    pub fn into_coordinates(self) -> Vec<Coordinates> {
        self.coordinates
    }

    pub fn start(&self) -> Coordinates {
        self.coordinates[0]
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Diagnostic attached to a routing failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingFailure {
    pub message: String,
    /// Raw backend payload (or a synthesized one for transport failures)
    pub detail: Value,
}

/// Result of a single routing-backend call.
///
/// `NotRoutable` is an expected outcome (no path within the search radius,
/// or an empty geometry) and lets searches move on to the next candidate;
/// `Failed` must abort the planning call. Both keep the backend payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingOutcome {
    Success(Route),
    NotRoutable(Value),
    Failed(RoutingFailure),
}

impl RoutingOutcome {
    /// Collapse to a route, turning anything else into a routing error.
    /// Used where no retry is possible.
    pub fn require_route(self, context: &str) -> crate::error::Result<Route> {
        match self {
            RoutingOutcome::Success(route) => Ok(route),
            RoutingOutcome::NotRoutable(detail) => Err(crate::error::AppError::routing(
                format!("{}: backend returned no route", context),
                detail,
            )),
            RoutingOutcome::Failed(failure) => Err(crate::error::AppError::routing(
                format!("{}: {}", context, failure.message),
                failure.detail,
            )),
        }
    }
}

/// A planned trip: the route plus its per-day distance breakdown (km).
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    /// Start the route was planned from, after snapping
    pub start: Coordinates,
    pub route: Route,
    pub day_distances: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_activity_settings() {
        assert_eq!(ActivityType::Trek.profile(), TravelProfile::Walking);
        assert_eq!(ActivityType::Bike.profile(), TravelProfile::Cycling);
        assert_eq!(ActivityType::Trek.days(), 1);
        assert_eq!(ActivityType::Bike.days(), 2);
        assert_eq!(ActivityType::Trek.max_km_per_day(), 10.0);
        assert_eq!(ActivityType::Bike.max_km_per_day(), 60.0);
    }

    #[test]
    fn test_ors_profile() {
        assert_eq!(TravelProfile::Walking.ors_profile(), "foot-hiking");
        assert_eq!(TravelProfile::Cycling.ors_profile(), "cycling-regular");
    }

    #[test]
    fn test_activity_from_str() {
        assert_eq!("trek".parse::<ActivityType>().unwrap(), ActivityType::Trek);
        assert_eq!("bike".parse::<ActivityType>().unwrap(), ActivityType::Bike);
        assert!("BIKE".parse::<ActivityType>().is_err());
        assert!("Trek".parse::<ActivityType>().is_err());
        assert!(" trek".parse::<ActivityType>().is_err());
        assert!("kayak".parse::<ActivityType>().is_err());
        assert!("".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_route_rejects_empty_geometry() {
        assert!(Route::new(vec![]).is_none());

        let route = Route::new(vec![Coordinates { lng: 1.0, lat: 2.0 }]).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route.start(), Coordinates { lng: 1.0, lat: 2.0 });
    }

    #[test]
    fn test_require_route() {
        let route = Route::new(vec![Coordinates { lng: 1.0, lat: 2.0 }]).unwrap();
        assert_eq!(
            RoutingOutcome::Success(route.clone())
                .require_route("trek")
                .unwrap(),
            route
        );

        let unreachable = serde_json::json!({"error": {"code": 2010, "message": "no point"}});
        match RoutingOutcome::NotRoutable(unreachable.clone()).require_route("trek") {
            Err(AppError::Routing { message, detail }) => {
                assert!(message.starts_with("trek"));
                assert_eq!(detail, unreachable);
            }
            other => panic!("expected routing error, got {:?}", other),
        }

        let failed = RoutingOutcome::Failed(RoutingFailure {
            message: "HTTP 500".into(),
            detail: serde_json::json!({"error": "boom"}),
        });
        match failed.require_route("trek") {
            Err(AppError::Routing { message, detail }) => {
                assert_eq!(message, "trek: HTTP 500");
                assert_eq!(detail["error"], "boom");
            }
            other => panic!("expected routing error, got {:?}", other),
        }
    }
}
