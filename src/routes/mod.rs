pub mod debug;
pub mod planner;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/planner/route", post(planner::plan_route))
        .route("/planner/places", post(planner::route_places))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
