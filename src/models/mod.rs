pub mod coordinates;
pub mod planner;
pub mod route;

pub use coordinates::Coordinates;
pub use planner::{DailyForecast, PlacesRequest, PlacesResponse, PlanRouteRequest, PlanRouteResponse};
pub use route::{ActivityType, Route, RoutingFailure, RoutingOutcome, TravelProfile, TripPlan};
