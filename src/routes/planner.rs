use crate::error::{AppError, Result};
use crate::models::{PlacesRequest, PlacesResponse, PlanRouteRequest, PlanRouteResponse};
use crate::services::trip_planner::{sample_key_points, RandomSeeds};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /planner/route
/// Geocode the location, plan a route for the activity and attach the forecast
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>> {
    let (location, activity) = request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        location = location,
        activity = %activity,
        "Plan request: {} trip from '{}'",
        activity,
        location
    );

    let origin = state.geocoder.forward_geocode(location).await?;
    if origin.is_none() {
        return Err(AppError::LocationUnresolved(location.to_string()));
    }

    let mut seeds = RandomSeeds::from_os_rng();
    let plan = state.planner.plan(activity, origin, &mut seeds).await?;

    // The forecast is a convenience; a plan without it is still useful
    let weather = match state.weather.trip_forecast(&plan.start).await {
        Ok(days) => days,
        Err(e) => {
            tracing::warn!(error = %e, "Weather lookup failed, returning plan without forecast");
            Vec::new()
        }
    };

    Ok(Json(PlanRouteResponse {
        lat: plan.start.lat,
        lon: plan.start.lng,
        coords: plan.route.into_coordinates(),
        day_distances: plan.day_distances,
        weather,
    }))
}

/// POST /planner/places
/// Sample key points along a route and name the places they fall in
pub async fn route_places(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlacesRequest>,
) -> Result<Json<PlacesResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let key_points = sample_key_points(&request.coords, request.count);
    let mut place_names: Vec<String> = Vec::new();

    for (i, point) in key_points.iter().enumerate() {
        // Nominatim allows roughly one request per second per client
        if i > 0 && !state.geocode_delay.is_zero() {
            tokio::time::sleep(state.geocode_delay).await;
        }

        match state.geocoder.reverse_geocode(point).await {
            Ok(Some(name)) => {
                if !place_names.contains(&name) {
                    place_names.push(name);
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Reverse geocoding failed for ({:.4}, {:.4}), skipping",
                    point.lng,
                    point.lat
                );
            }
        }
    }

    tracing::info!(
        key_points = key_points.len(),
        places = place_names.len(),
        "Named {} places from {} key points",
        place_names.len(),
        key_points.len()
    );

    Ok(Json(PlacesResponse {
        key_points,
        place_names,
    }))
}
