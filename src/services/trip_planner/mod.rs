mod bike_route;
pub mod day_split;
pub mod geodesy;
pub mod key_points;
pub mod search_candidates;
pub mod seeds;
mod trek_route;

use crate::config::PlannerConfig;
use crate::constants::{BIKE_DAYS, MAX_KM_PER_DAY_BIKE, TREK_DAYS};
use crate::error::{AppError, Result};
use crate::models::{ActivityType, Coordinates, TravelProfile, TripPlan};
use crate::services::point_resolver::PointResolver;
use crate::services::routing::RoutingBackend;
use std::sync::Arc;

pub use bike_route::{loop_split_index, BikeRouteBuilder};
pub use day_split::split_into_days;
pub use key_points::sample_key_points;
pub use seeds::{FixedSeeds, RandomSeeds, SeedSource};
pub use trek_route::TrekRouteBuilder;

/// Entry point for route construction: snaps the start, builds a route for
/// the activity and splits it into days. Holds no per-request state, so one
/// planner serves any number of concurrent requests.
pub struct TripPlanner {
    resolver: PointResolver,
    trek_builder: TrekRouteBuilder,
    bike_builder: BikeRouteBuilder,
    config: PlannerConfig,
}

impl TripPlanner {
    pub fn new(backend: Arc<dyn RoutingBackend>, config: PlannerConfig) -> Self {
        let resolver = PointResolver::new(backend.clone());
        let trek_builder = TrekRouteBuilder::new(backend.clone(), config.max_trek_loop_m);
        let bike_builder = BikeRouteBuilder::new(backend, resolver.clone(), config.clone());

        TripPlanner {
            resolver,
            trek_builder,
            bike_builder,
            config,
        }
    }

    /// Snap a geocoded start onto the network, keeping the raw point if the
    /// backend finds nothing nearby.
    pub async fn snap_start(&self, origin: Coordinates, profile: TravelProfile) -> Coordinates {
        self.resolver
            .resolve_or_raw(origin, profile, &self.config.start_snap_radii_m)
            .await
    }

    /// Single-day walking loop capped at `max_km_per_day`.
    pub async fn plan_trek_route(
        &self,
        origin: Coordinates,
        max_km_per_day: f64,
        seeds: &mut dyn SeedSource,
    ) -> Result<TripPlan> {
        let route = self
            .trek_builder
            .build_trek_route(&origin, max_km_per_day, seeds)
            .await?;
        let day_distances = split_into_days(route.coordinates(), TREK_DAYS, max_km_per_day);

        Ok(TripPlan {
            start: origin,
            route,
            day_distances,
        })
    }

    /// Two-day cycling ride with a 60 km daily cap.
    pub async fn plan_bike_route(
        &self,
        origin: Coordinates,
        seeds: &mut dyn SeedSource,
    ) -> Result<TripPlan> {
        let route = self.bike_builder.build_bike_route(&origin, seeds).await?;
        let day_distances = split_into_days(route.coordinates(), BIKE_DAYS, MAX_KM_PER_DAY_BIKE);

        tracing::info!(
            path_points = route.len(),
            day_distances = ?day_distances,
            "Bike plan ready"
        );

        Ok(TripPlan {
            start: origin,
            route,
            day_distances,
        })
    }

    /// Plan a trip for `activity`. A missing origin (nothing geocoded) is
    /// refused before any backend call.
    pub async fn plan(
        &self,
        activity: ActivityType,
        origin: Option<Coordinates>,
        seeds: &mut dyn SeedSource,
    ) -> Result<TripPlan> {
        let origin = origin.ok_or_else(|| {
            AppError::LocationUnresolved("no start coordinate to plan from".to_string())
        })?;

        let start = self.snap_start(origin, activity.profile()).await;

        match activity {
            ActivityType::Trek => {
                self.plan_trek_route(start, activity.max_km_per_day(), seeds)
                    .await
            }
            ActivityType::Bike => self.plan_bike_route(start, seeds).await,
        }
    }
}
