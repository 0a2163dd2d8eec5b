pub mod geocoding;
pub mod openroute;
pub mod point_resolver;
pub mod routing;
pub mod trip_planner;
pub mod weather;
