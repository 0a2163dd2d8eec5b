use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ors_api_key: String,
    pub ors_base_url: String,
    pub nominatim_base_url: String,
    pub open_meteo_base_url: String,
    pub user_agent: String,
    pub geocode_delay_ms: u64,
    pub place_cache_ttl: u64,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Radius ladder (meters) tried when snapping the bike origin
    pub bike_origin_radii_m: Vec<f64>,

    /// Radius ladder (meters) tried when snapping projected candidates and
    /// the loop fallback split point
    pub candidate_radii_m: Vec<f64>,

    /// Radius ladder (meters) used to snap a geocoded start before planning
    pub start_snap_radii_m: Vec<f64>,

    /// Straight-line distances (km) tried for every candidate bearing, in order
    pub candidate_distances_km: Vec<f64>,

    /// Length (meters) of the round trip requested when direct search fails
    pub fallback_loop_m: f64,

    /// Upper bound (meters) on trek round-trip requests
    pub max_trek_loop_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bike_origin_radii_m: DEFAULT_BIKE_ORIGIN_RADII_M.to_vec(),
            candidate_radii_m: DEFAULT_CANDIDATE_RADII_M.to_vec(),
            start_snap_radii_m: DEFAULT_START_SNAP_RADII_M.to_vec(),
            candidate_distances_km: DEFAULT_CANDIDATE_DISTANCES_KM.to_vec(),
            fallback_loop_m: DEFAULT_FALLBACK_LOOP_M,
            max_trek_loop_m: DEFAULT_MAX_TREK_LOOP_M,
        }
    }
}

/// Parse a comma-separated list of positive numbers, e.g. `500,1000,2000`.
fn parse_positive_list(raw: &str, name: &str) -> Result<Vec<f64>, String> {
    let values = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("Invalid {}", name)))
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(format!("{} must not be empty", name));
    }
    if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Err(format!("{} values must be positive", name));
    }
    Ok(values)
}

fn list_from_env(name: &str, default: &[f64]) -> Result<Vec<f64>, String> {
    match env::var(name) {
        Ok(raw) => parse_positive_list(&raw, name),
        Err(_) => Ok(default.to_vec()),
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let fallback_loop_m: f64 = env::var("PLANNER_FALLBACK_LOOP_M")
            .unwrap_or_else(|_| defaults.fallback_loop_m.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_FALLBACK_LOOP_M")?;

        let max_trek_loop_m: f64 = env::var("PLANNER_MAX_TREK_LOOP_M")
            .unwrap_or_else(|_| defaults.max_trek_loop_m.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_MAX_TREK_LOOP_M")?;

        if fallback_loop_m <= 0.0 || max_trek_loop_m <= 0.0 {
            return Err("Loop lengths must be positive".to_string());
        }

        Ok(Self {
            bike_origin_radii_m: list_from_env(
                "PLANNER_BIKE_ORIGIN_RADII_M",
                &defaults.bike_origin_radii_m,
            )?,
            candidate_radii_m: list_from_env(
                "PLANNER_CANDIDATE_RADII_M",
                &defaults.candidate_radii_m,
            )?,
            start_snap_radii_m: list_from_env(
                "PLANNER_START_SNAP_RADII_M",
                &defaults.start_snap_radii_m,
            )?,
            candidate_distances_km: list_from_env(
                "PLANNER_CANDIDATE_DISTANCES_KM",
                &defaults.candidate_distances_km,
            )?,
            fallback_loop_m,
            max_trek_loop_m,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            ors_api_key: env::var("ORS_API_KEY").map_err(|_| "ORS_API_KEY must be set")?,
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ORS_BASE_URL.to_string()),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_BASE_URL.to_string()),
            open_meteo_base_url: env::var("OPEN_METEO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPEN_METEO_BASE_URL.to_string()),
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            geocode_delay_ms: env::var("GEOCODE_DELAY_MS")
                .unwrap_or_else(|_| DEFAULT_GEOCODE_DELAY_MS.to_string())
                .parse()
                .map_err(|_| "Invalid GEOCODE_DELAY_MS")?,
            place_cache_ttl: env::var("PLACE_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_PLACE_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid PLACE_CACHE_TTL")?,
            planner: PlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
