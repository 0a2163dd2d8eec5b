use crate::models::{Coordinates, TravelProfile};
use crate::services::routing::RoutingBackend;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Snaps arbitrary coordinates onto the routable network, widening the
/// search radius until the backend finds something.
#[derive(Clone)]
pub struct PointResolver {
    backend: Arc<dyn RoutingBackend>,
}

impl PointResolver {
    pub fn new(backend: Arc<dyn RoutingBackend>) -> Self {
        PointResolver { backend }
    }

    /// Try each radius in order and return the first match. Backend errors
    /// only skip to the next radius; `None` means the ladder was exhausted.
    #[instrument(skip(self, radii_m), fields(lng = point.lng, lat = point.lat))]
    pub async fn resolve_routable_point(
        &self,
        point: &Coordinates,
        profile: TravelProfile,
        radii_m: &[f64],
    ) -> Option<Coordinates> {
        for &radius_m in radii_m {
            match self.backend.nearest(profile, point, radius_m).await {
                Ok(Some(snapped)) => {
                    debug!(
                        radius_m = radius_m,
                        "Snapped to ({:.5}, {:.5}) within {}m",
                        snapped.lng,
                        snapped.lat,
                        radius_m
                    );
                    return Some(snapped);
                }
                Ok(None) => {
                    debug!(radius_m = radius_m, "No routable point within {}m", radius_m);
                }
                Err(e) => {
                    debug!(radius_m = radius_m, error = %e, "Nearest lookup failed, widening radius");
                }
            }
        }

        debug!(radii = radii_m.len(), "Point could not be snapped");
        None
    }

    /// Resolve the point, or keep it unchanged when nothing routable is found.
    pub async fn resolve_or_raw(
        &self,
        point: Coordinates,
        profile: TravelProfile,
        radii_m: &[f64],
    ) -> Coordinates {
        self.resolve_routable_point(&point, profile, radii_m)
            .await
            .unwrap_or(point)
    }
}
