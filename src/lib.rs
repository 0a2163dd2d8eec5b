// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use services::geocoding::Geocoder;
use services::trip_planner::TripPlanner;
use services::weather::WeatherProvider;
use std::sync::Arc;
use std::time::Duration;

// App state for sharing across the application
pub struct AppState {
    pub planner: TripPlanner,
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherProvider>,
    /// Pause between consecutive reverse-geocoding calls
    pub geocode_delay: Duration,
}
