//! Stable application-wide constants.
//!
//! Values here are activity caps, search-space shape, and default fallbacks for
//! env-var-based configuration. Radius ladders and candidate distances can be
//! overridden at runtime, see [`PlannerConfig`](crate::config::PlannerConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- External service endpoints ---

/// OpenRouteService v2 API root.
pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org/v2";
/// Nominatim root used for forward and reverse geocoding.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Open-Meteo forecast API root.
pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";
/// Nominatim rejects anonymous clients, so every request carries this.
pub const DEFAULT_USER_AGENT: &str = "TripPlannerApp/1.0";

// --- Activity caps ---

/// Maximum distance (km) for a single trek day.
pub const MAX_KM_PER_DAY_TREK: f64 = 10.0;
/// Maximum distance (km) for a single bike day.
pub const MAX_KM_PER_DAY_BIKE: f64 = 60.0;
/// Trek trips are single-day loops.
pub const TREK_DAYS: usize = 1;
/// Bike trips are two-day point-to-point rides.
pub const BIKE_DAYS: usize = 2;

// --- Geodesy ---

/// Mean Earth radius used by every spherical computation in the planner.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Point resolution ---

/// Radius ladder (meters) for snapping the bike origin.
pub const DEFAULT_BIKE_ORIGIN_RADII_M: [f64; 4] = [500.0, 1000.0, 2000.0, 5000.0];
/// Radius ladder (meters) for snapping projected candidate destinations and
/// the fallback split point.
pub const DEFAULT_CANDIDATE_RADII_M: [f64; 5] = [500.0, 1000.0, 2000.0, 5000.0, 10000.0];
/// Single radius (meters) used to snap a geocoded start before planning.
pub const DEFAULT_START_SNAP_RADII_M: [f64; 1] = [1000.0];

// --- Bike direct search ---

/// Offsets (degrees) applied to the randomized base bearing, in search order.
pub const BEARING_OFFSETS_DEG: [i32; 7] = [0, 30, -30, 60, -60, 90, -90];
/// Candidate straight-line distances (km) tried for every bearing, longest first.
pub const DEFAULT_CANDIDATE_DISTANCES_KM: [f64; 8] =
    [110.0, 100.0, 95.0, 90.0, 85.0, 80.0, 70.0, 60.0];

// --- Loop requests ---

/// Upper bound (meters) on any trek round-trip request.
pub const DEFAULT_MAX_TREK_LOOP_M: f64 = 100_000.0;
/// Length (meters) of the round trip requested by the bike loop fallback.
pub const DEFAULT_FALLBACK_LOOP_M: f64 = 100_000.0;
/// Seeds drawn for the backend's round-trip generator lie in `[0, SEED_RANGE)`.
pub const SEED_RANGE: u32 = 10_000;

// --- Day balancing ---

/// The fallback loop is split at the point closest to a target that lies in
/// `[LOOP_SPLIT_MIN_FRACTION, LOOP_SPLIT_MAX_FRACTION]` of the loop length.
pub const LOOP_SPLIT_MIN_FRACTION: f64 = 0.45;
pub const LOOP_SPLIT_MAX_FRACTION: f64 = 0.55;
/// Two-day splits keep day 1 within this fraction window of the total.
pub const TWO_DAY_MIN_FRACTION: f64 = 0.4;
pub const TWO_DAY_MAX_FRACTION: f64 = 0.6;
/// Minimum number of points a fallback loop needs before it can be split.
pub const MIN_FALLBACK_LOOP_POINTS: usize = 3;

// --- Place lookup ---

/// Number of key points sampled along a route for place-name lookup.
pub const DEFAULT_KEY_POINT_COUNT: usize = 10;
/// Delay between consecutive reverse-geocoding calls (Nominatim rate limit).
pub const DEFAULT_GEOCODE_DELAY_MS: u64 = 500;
/// Zoom level for reverse geocoding (10 = city/town granularity).
pub const REVERSE_GEOCODE_ZOOM: u8 = 10;
/// Reverse-geocoded place names are cached for this long.
pub const DEFAULT_PLACE_CACHE_TTL_SECONDS: u64 = 86_400;
/// Maximum entries in the reverse-geocoding cache.
pub const DEFAULT_PLACE_CACHE_MAX_ENTRIES: u64 = 10_000;
/// Forecast days returned with a plan (the trip starts tomorrow).
pub const FORECAST_DAYS: usize = 3;
