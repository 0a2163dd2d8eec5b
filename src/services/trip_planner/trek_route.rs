use super::seeds::SeedSource;
use crate::error::Result;
use crate::models::{Coordinates, Route, TravelProfile};
use crate::services::routing::RoutingBackend;
use std::sync::Arc;

/// Builds single-day walking loops with one round-trip request.
pub struct TrekRouteBuilder {
    backend: Arc<dyn RoutingBackend>,
    max_loop_m: f64,
}

impl TrekRouteBuilder {
    pub fn new(backend: Arc<dyn RoutingBackend>, max_loop_m: f64) -> Self {
        Self {
            backend,
            max_loop_m,
        }
    }

    /// Loop length requested for a given daily cap.
    pub fn loop_length_m(&self, max_km_per_day: f64) -> f64 {
        (max_km_per_day * 1000.0).min(self.max_loop_m)
    }

    /// Request one loop from `origin`. No retries: any failure or empty
    /// geometry is a routing error.
    pub async fn build_trek_route(
        &self,
        origin: &Coordinates,
        max_km_per_day: f64,
        seeds: &mut dyn SeedSource,
    ) -> Result<Route> {
        let length_m = self.loop_length_m(max_km_per_day);
        let seed = seeds.next_seed();

        tracing::info!(
            length_m = length_m,
            seed = seed,
            "Building trek loop: {:.1}km from ({:.4}, {:.4})",
            length_m / 1000.0,
            origin.lng,
            origin.lat
        );

        let route = self
            .backend
            .round_trip(TravelProfile::Walking, origin, length_m, seed)
            .await
            .require_route("trek round trip")?;

        tracing::info!(path_points = route.len(), "Trek loop built");
        Ok(route)
    }
}
