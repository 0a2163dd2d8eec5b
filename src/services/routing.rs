use crate::error::Result;
use crate::models::{Coordinates, RoutingOutcome, TravelProfile};
use async_trait::async_trait;

/// Routing capabilities the planner needs from a backend.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Nearest traversable point within `radius_m` of `point`.
    /// `Ok(None)` means nothing routable was found in that radius.
    async fn nearest(
        &self,
        profile: TravelProfile,
        point: &Coordinates,
        radius_m: f64,
    ) -> Result<Option<Coordinates>>;

    /// Point-to-point route from `from` to `to`.
    async fn directions(
        &self,
        profile: TravelProfile,
        from: &Coordinates,
        to: &Coordinates,
    ) -> RoutingOutcome;

    /// Closed loop of roughly `length_m` meters starting and ending at `origin`.
    /// The same seed yields the same loop shape.
    async fn round_trip(
        &self,
        profile: TravelProfile,
        origin: &Coordinates,
        length_m: f64,
        seed: u32,
    ) -> RoutingOutcome;
}
