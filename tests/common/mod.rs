use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use tripplanner::error::{AppError, Result};
use tripplanner::models::{Coordinates, DailyForecast, Route, RoutingOutcome, TravelProfile};
use tripplanner::services::geocoding::Geocoder;
use tripplanner::services::routing::RoutingBackend;
use tripplanner::services::trip_planner::geodesy::destination_point;
use tripplanner::services::weather::WeatherProvider;

type NearestFn = Box<dyn Fn(&Coordinates, f64) -> Result<Option<Coordinates>> + Send + Sync>;
type DirectionsFn = Box<dyn Fn(&Coordinates, &Coordinates) -> RoutingOutcome + Send + Sync>;
type RoundTripFn = Box<dyn Fn(&Coordinates, f64, u32) -> RoutingOutcome + Send + Sync>;

/// One recorded call against the mock backend
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Nearest {
        profile: TravelProfile,
        point: Coordinates,
        radius_m: f64,
    },
    Directions {
        profile: TravelProfile,
        from: Coordinates,
        to: Coordinates,
    },
    RoundTrip {
        profile: TravelProfile,
        origin: Coordinates,
        length_m: f64,
        seed: u32,
    },
}

/// Scriptable routing backend. By default `nearest` returns the query point
/// unchanged and both route calls answer `NotRoutable` with an
/// unreachable-point payload.
pub struct MockRoutingBackend {
    nearest: NearestFn,
    directions: DirectionsFn,
    round_trip: RoundTripFn,
    calls: Mutex<Vec<BackendCall>>,
}

#[allow(dead_code)]
impl MockRoutingBackend {
    pub fn new() -> Self {
        MockRoutingBackend {
            nearest: Box::new(|point, _| Ok(Some(*point))),
            directions: Box::new(|_, _| unreachable()),
            round_trip: Box::new(|_, _, _| unreachable()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_nearest(
        mut self,
        f: impl Fn(&Coordinates, f64) -> Result<Option<Coordinates>> + Send + Sync + 'static,
    ) -> Self {
        self.nearest = Box::new(f);
        self
    }

    pub fn with_directions(
        mut self,
        f: impl Fn(&Coordinates, &Coordinates) -> RoutingOutcome + Send + Sync + 'static,
    ) -> Self {
        self.directions = Box::new(f);
        self
    }

    pub fn with_round_trip(
        mut self,
        f: impl Fn(&Coordinates, f64, u32) -> RoutingOutcome + Send + Sync + 'static,
    ) -> Self {
        self.round_trip = Box::new(f);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn directions_calls(&self) -> Vec<(Coordinates, Coordinates)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Directions { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    pub fn round_trip_calls(&self) -> Vec<(Coordinates, f64, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::RoundTrip {
                    origin,
                    length_m,
                    seed,
                    ..
                } => Some((origin, length_m, seed)),
                _ => None,
            })
            .collect()
    }

    pub fn nearest_radii(&self) -> Vec<f64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Nearest { radius_m, .. } => Some(radius_m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RoutingBackend for MockRoutingBackend {
    async fn nearest(
        &self,
        profile: TravelProfile,
        point: &Coordinates,
        radius_m: f64,
    ) -> Result<Option<Coordinates>> {
        self.record(BackendCall::Nearest {
            profile,
            point: *point,
            radius_m,
        });
        (self.nearest)(point, radius_m)
    }

    async fn directions(
        &self,
        profile: TravelProfile,
        from: &Coordinates,
        to: &Coordinates,
    ) -> RoutingOutcome {
        self.record(BackendCall::Directions {
            profile,
            from: *from,
            to: *to,
        });
        (self.directions)(from, to)
    }

    async fn round_trip(
        &self,
        profile: TravelProfile,
        origin: &Coordinates,
        length_m: f64,
        seed: u32,
    ) -> RoutingOutcome {
        self.record(BackendCall::RoundTrip {
            profile,
            origin: *origin,
            length_m,
            seed,
        });
        (self.round_trip)(origin, length_m, seed)
    }
}

/// Geocoder answering from fixed data. Reverse lookups are named after the
/// latitude rounded to 0.1°, so nearby points share a name.
#[allow(dead_code)]
pub struct MockGeocoder {
    pub forward: Option<Coordinates>,
    pub fail_reverse: bool,
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn forward_geocode(&self, _query: &str) -> Result<Option<Coordinates>> {
        Ok(self.forward)
    }

    async fn reverse_geocode(&self, point: &Coordinates) -> Result<Option<String>> {
        if self.fail_reverse {
            return Err(AppError::Geocoding("reverse lookup unavailable".to_string()));
        }
        Ok(Some(format!("Place {:.1}", point.lat)))
    }
}

#[allow(dead_code)]
pub struct MockWeather {
    pub fail: bool,
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn trip_forecast(&self, _point: &Coordinates) -> Result<Vec<DailyForecast>> {
        if self.fail {
            return Err(AppError::Weather("forecast unavailable".to_string()));
        }
        Ok(vec![
            DailyForecast {
                date: "2026-06-02".to_string(),
                temp_max: Some(21.5),
                temp_min: Some(11.0),
                weathercode: Some(1),
            },
            DailyForecast {
                date: "2026-06-03".to_string(),
                temp_max: Some(19.0),
                temp_min: Some(10.2),
                weathercode: Some(61),
            },
            DailyForecast {
                date: "2026-06-04".to_string(),
                temp_max: None,
                temp_min: None,
                weathercode: None,
            },
        ])
    }
}

/// Error body the directions service sends when no routable point is in range
#[allow(dead_code)]
pub fn unreachable_body() -> Value {
    json!({
        "error": {
            "code": 2010,
            "message": "Could not find routable point within a radius of 350.0 meters of specified coordinate 0: 7.4474000 46.9480000."
        },
        "info": { "engine": { "version": "8.0.0" } }
    })
}

#[allow(dead_code)]
pub fn unreachable() -> RoutingOutcome {
    RoutingOutcome::NotRoutable(unreachable_body())
}

#[allow(dead_code)]
pub fn bern() -> Coordinates {
    Coordinates::new(7.4474, 46.9480).unwrap()
}

/// Evenly spaced points on the straight line between two coordinates
#[allow(dead_code)]
pub fn straight_route(from: &Coordinates, to: &Coordinates, points: usize) -> Route {
    let steps = points.max(2) - 1;
    let coordinates = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Coordinates::new(
                from.lng + (to.lng - from.lng) * t,
                from.lat + (to.lat - from.lat) * t,
            )
            .unwrap()
        })
        .collect();
    Route::new(coordinates).unwrap()
}

/// Closed circular loop of `radius_km` that starts and ends exactly at `origin`
#[allow(dead_code)]
pub fn circular_loop(origin: &Coordinates, radius_km: f64, points: usize) -> Route {
    let center = destination_point(origin, radius_km, 0.0);
    let steps = points.max(3) - 1;
    let around = (1..steps)
        .map(|i| destination_point(&center, radius_km, 180.0 + 360.0 * i as f64 / steps as f64));
    let coordinates = std::iter::once(*origin)
        .chain(around)
        .chain(std::iter::once(*origin))
        .collect();
    Route::new(coordinates).unwrap()
}
