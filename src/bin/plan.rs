use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripplanner::config::Config;
use tripplanner::models::{ActivityType, PlanRouteResponse};
use tripplanner::services::geocoding::{Geocoder, NominatimClient};
use tripplanner::services::openroute::OpenRouteServiceClient;
use tripplanner::services::trip_planner::{RandomSeeds, TripPlanner};
use tripplanner::services::weather::{OpenMeteoClient, WeatherProvider};

fn print_help() {
    eprintln!(
        "\
Usage: plan --location=PLACE --type=bike|trek [OPTIONS]

Options:
  --location=PLACE      Free-text start location (geocoded with Nominatim)
  --type=TYPE           Trip type: bike (2 days, 60 km/day) or trek (1 day, 10 km)
  --seed=N              Seed the planner's random choices for a reproducible plan
  --no-weather          Skip the forecast lookup
  --help                Show this help message"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays plain JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripplanner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let Some(location) = args.iter().find_map(|a| a.strip_prefix("--location=")) else {
        print_help();
        return Err("--location is required".into());
    };
    let activity: ActivityType = args
        .iter()
        .find_map(|a| a.strip_prefix("--type="))
        .ok_or("--type is required")?
        .parse()?;
    let seed: Option<u64> = args
        .iter()
        .find_map(|a| a.strip_prefix("--seed="))
        .map(str::parse)
        .transpose()?;
    let with_weather = !args.iter().any(|a| a == "--no-weather");

    let config = Config::from_env().map_err(|e| format!("Config error: {}", e))?;

    let backend = Arc::new(OpenRouteServiceClient::with_base_url(
        config.ors_api_key.clone(),
        config.ors_base_url.clone(),
    ));
    let geocoder = NominatimClient::new(
        config.nominatim_base_url.clone(),
        config.user_agent.clone(),
        config.place_cache_ttl,
    );
    let planner = TripPlanner::new(backend, config.planner.clone());

    let origin = geocoder.forward_geocode(location).await?;
    let mut seeds = match seed {
        Some(seed) => RandomSeeds::seeded(seed),
        None => RandomSeeds::from_os_rng(),
    };
    let plan = planner.plan(activity, origin, &mut seeds).await?;

    let weather = if with_weather {
        let client = OpenMeteoClient::new(config.open_meteo_base_url.clone());
        client.trip_forecast(&plan.start).await.unwrap_or_else(|e| {
            tracing::warn!("Forecast unavailable: {}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    eprintln!(
        "{} plan from {}: {} points, days {:?} km",
        activity,
        location,
        plan.route.len(),
        plan.day_distances
            .iter()
            .map(|d| format!("{:.1}", d))
            .collect::<Vec<_>>()
    );

    let response = PlanRouteResponse {
        lat: plan.start.lat,
        lon: plan.start.lng,
        coords: plan.route.into_coordinates(),
        day_distances: plan.day_distances,
        weather,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
