use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripplanner::config::Config;
use tripplanner::services::geocoding::NominatimClient;
use tripplanner::services::openroute::OpenRouteServiceClient;
use tripplanner::services::trip_planner::TripPlanner;
use tripplanner::services::weather::OpenMeteoClient;
use tripplanner::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripplanner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting trip planner API server");
    tracing::info!(
        routing = %config.ors_base_url,
        geocoding = %config.nominatim_base_url,
        "Configuration loaded successfully"
    );

    // Initialize services
    let routing_backend = Arc::new(OpenRouteServiceClient::with_base_url(
        config.ors_api_key.clone(),
        config.ors_base_url.clone(),
    ));
    let geocoder = Arc::new(NominatimClient::new(
        config.nominatim_base_url.clone(),
        config.user_agent.clone(),
        config.place_cache_ttl,
    ));
    let weather = Arc::new(OpenMeteoClient::new(config.open_meteo_base_url.clone()));
    let planner = TripPlanner::new(routing_backend, config.planner.clone());

    // Create application state
    let state = Arc::new(AppState {
        planner,
        geocoder,
        weather,
        geocode_delay: Duration::from_millis(config.geocode_delay_ms),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api", tripplanner::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
