use super::geodesy::{cumulative_distances_km, destination_point};
use super::search_candidates::{SearchCandidate, SearchCandidates};
use super::seeds::SeedSource;
use crate::config::PlannerConfig;
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Route, RoutingOutcome, TravelProfile};
use crate::services::point_resolver::PointResolver;
use crate::services::routing::RoutingBackend;
use serde_json::json;
use std::sync::Arc;

const PROFILE: TravelProfile = TravelProfile::Cycling;

/// Builds two-day point-to-point rides.
///
/// Direct search projects destinations over a fan of bearings and distances
/// and keeps the first one the backend can route to. If the whole grid fails,
/// a round-trip loop is requested and cut near its midpoint instead.
pub struct BikeRouteBuilder {
    backend: Arc<dyn RoutingBackend>,
    resolver: PointResolver,
    config: PlannerConfig,
}

impl BikeRouteBuilder {
    pub fn new(
        backend: Arc<dyn RoutingBackend>,
        resolver: PointResolver,
        config: PlannerConfig,
    ) -> Self {
        Self {
            backend,
            resolver,
            config,
        }
    }

    pub async fn build_bike_route(
        &self,
        origin: &Coordinates,
        seeds: &mut dyn SeedSource,
    ) -> Result<Route> {
        let start = self
            .resolver
            .resolve_or_raw(*origin, PROFILE, &self.config.bike_origin_radii_m)
            .await;

        let base_bearing = seeds.next_seed() % 360;
        if let Some(route) = self.direct_search(&start, base_bearing).await? {
            return Ok(route);
        }

        tracing::warn!(
            "Direct bike search exhausted, falling back to a {:.0}km loop",
            self.config.fallback_loop_m / 1000.0
        );
        self.loop_fallback(&start, seeds.next_seed()).await
    }

    /// First routable candidate wins. `Ok(None)` means the grid was exhausted.
    async fn direct_search(&self, start: &Coordinates, base_bearing: u32) -> Result<Option<Route>> {
        let candidates = SearchCandidates::new(base_bearing, &self.config.candidate_distances_km);
        let grid_size = candidates.grid_size();

        tracing::info!(
            base_bearing = base_bearing,
            candidates = grid_size,
            "Direct bike search from ({:.4}, {:.4}), base bearing {}°",
            start.lng,
            start.lat,
            base_bearing
        );

        for (attempt, candidate) in candidates.enumerate() {
            match self.try_candidate(start, candidate).await {
                RoutingOutcome::Success(route) => {
                    tracing::info!(
                        bearing = candidate.bearing_deg,
                        distance_km = candidate.distance_km,
                        attempt = attempt + 1,
                        "Bike route found at bearing {}°, {}km (attempt {}/{})",
                        candidate.bearing_deg,
                        candidate.distance_km,
                        attempt + 1,
                        grid_size
                    );
                    return Ok(Some(route));
                }
                RoutingOutcome::NotRoutable(_) => continue,
                RoutingOutcome::Failed(failure) => {
                    return Err(AppError::routing(
                        format!("bike directions: {}", failure.message),
                        failure.detail,
                    ));
                }
            }
        }

        Ok(None)
    }

    async fn try_candidate(&self, start: &Coordinates, candidate: SearchCandidate) -> RoutingOutcome {
        let projected = destination_point(
            start,
            candidate.distance_km,
            f64::from(candidate.bearing_deg),
        );

        let Some(destination) = self
            .resolver
            .resolve_routable_point(&projected, PROFILE, &self.config.candidate_radii_m)
            .await
        else {
            tracing::debug!(
                bearing = candidate.bearing_deg,
                distance_km = candidate.distance_km,
                "Candidate destination not snappable, skipping"
            );
            return RoutingOutcome::NotRoutable(json!({
                "message": "No routable point near candidate destination"
            }));
        };

        self.backend.directions(PROFILE, start, &destination).await
    }

    async fn loop_fallback(&self, start: &Coordinates, seed: u32) -> Result<Route> {
        let loop_route = self
            .backend
            .round_trip(PROFILE, start, self.config.fallback_loop_m, seed)
            .await
            .require_route("bike fallback loop")?;

        if loop_route.len() < MIN_FALLBACK_LOOP_POINTS {
            return Err(AppError::NoRouteFound(format!(
                "Fallback loop too short ({} points)",
                loop_route.len()
            )));
        }

        let cumulative = cumulative_distances_km(loop_route.coordinates());
        let split_index = loop_split_index(&cumulative);
        let split_point = loop_route.coordinates()[split_index];

        tracing::info!(
            loop_km = %format!("{:.1}", cumulative[cumulative.len() - 1]),
            split_index = split_index,
            split_km = %format!("{:.1}", cumulative[split_index]),
            "Splitting fallback loop at point {} ({:.1}km)",
            split_index,
            cumulative[split_index]
        );

        let destination = self
            .resolver
            .resolve_or_raw(split_point, PROFILE, &self.config.candidate_radii_m)
            .await;

        self.backend
            .directions(PROFILE, start, &destination)
            .await
            .require_route("bike fallback leg")
    }
}

/// Index (never the first) whose cumulative distance is closest to a target
/// near half the loop, kept within 45%..55% of the total. Ties keep the
/// earlier index.
pub fn loop_split_index(cumulative_km: &[f64]) -> usize {
    let Some(&total) = cumulative_km.last() else {
        return 0;
    };
    if cumulative_km.len() < 2 {
        return 0;
    }

    let target = (total * 0.5)
        .max(total * LOOP_SPLIT_MIN_FRACTION)
        .min(total * LOOP_SPLIT_MAX_FRACTION);

    let mut best = 1;
    for (i, distance) in cumulative_km.iter().enumerate().skip(1) {
        if (distance - target).abs() < (cumulative_km[best] - target).abs() {
            best = i;
        }
    }
    best
}
