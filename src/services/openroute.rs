use crate::error::{AppError, Result};
use crate::models::{Coordinates, Route, RoutingFailure, RoutingOutcome, TravelProfile};
use crate::services::routing::RoutingBackend;
use async_trait::async_trait;
use geojson::FeatureCollection;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// ORS error code for "could not find routable point within a radius".
const ORS_UNREACHABLE_CODE: i64 = 2010;

/// OpenRouteService v2 client. The API key travels in the `Authorization`
/// header, so a proxy base URL can be swapped in without code changes.
#[derive(Clone)]
pub struct OpenRouteServiceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouteServiceClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, crate::constants::DEFAULT_ORS_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        OpenRouteServiceClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn directions_url(&self, profile: TravelProfile) -> String {
        format!("{}/directions/{}/geojson", self.base_url, profile.ors_profile())
    }

    async fn post_directions(&self, profile: TravelProfile, body: Value) -> RoutingOutcome {
        let response = match self
            .client
            .post(self.directions_url(profile))
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(profile = %profile, "ORS directions request failed: {}", e);
                return RoutingOutcome::Failed(RoutingFailure {
                    message: format!("Request failed: {}", e),
                    detail: json!({ "message": e.to_string() }),
                });
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return body_read_failure(status, &e),
        };
        let payload = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "message": text }));

        outcome_from_response(status, payload)
    }
}

fn body_read_failure(status: StatusCode, error: &reqwest::Error) -> RoutingOutcome {
    tracing::warn!(status = %status, "ORS directions body could not be read: {}", error);
    RoutingOutcome::Failed(RoutingFailure {
        message: format!("Failed to read response body (HTTP {}): {}", status, error),
        detail: json!({ "message": error.to_string() }),
    })
}

/// Interpret a directions response. Kept free of I/O so the mapping from
/// backend answers to outcomes can be tested directly.
fn outcome_from_response(status: StatusCode, payload: Value) -> RoutingOutcome {
    if !status.is_success() {
        if error_code(&payload) == Some(ORS_UNREACHABLE_CODE) {
            tracing::debug!("ORS could not route within search radius (code 2010)");
            return RoutingOutcome::NotRoutable(payload);
        }
        tracing::warn!(status = %status, "ORS directions HTTP error {}: {}", status, payload);
        return RoutingOutcome::Failed(RoutingFailure {
            message: format!("HTTP {}", status),
            detail: payload,
        });
    }

    let collection: FeatureCollection = match serde_json::from_value(payload.clone()) {
        Ok(collection) => collection,
        Err(e) => {
            return RoutingOutcome::Failed(RoutingFailure {
                message: format!("Failed to parse response: {}", e),
                detail: payload,
            });
        }
    };

    let Some(path) = line_string(&collection) else {
        tracing::warn!("ORS route geometry contains an invalid position");
        return RoutingOutcome::Failed(RoutingFailure {
            message: "Invalid position in route geometry".to_string(),
            detail: payload,
        });
    };

    match Route::new(path) {
        Some(route) => {
            tracing::debug!(path_points = route.len(), "ORS response: {} path points", route.len());
            RoutingOutcome::Success(route)
        }
        None => {
            tracing::debug!("ORS returned no route geometry");
            RoutingOutcome::NotRoutable(payload)
        }
    }
}

fn error_code(payload: &Value) -> Option<i64> {
    payload.pointer("/error/code").and_then(Value::as_i64)
}

/// Coordinates of the first feature's LineString, empty if there is none.
/// `None` when any vertex is not a valid position.
fn line_string(collection: &FeatureCollection) -> Option<Vec<Coordinates>> {
    let Some(geometry) = collection
        .features
        .first()
        .and_then(|feature| feature.geometry.as_ref())
    else {
        return Some(Vec::new());
    };

    match &geometry.value {
        geojson::Value::LineString(line) => line
            .iter()
            .map(|position| Coordinates::from_position(position))
            .collect(),
        _ => Some(Vec::new()),
    }
}

/// Coordinates of the first feature's Point, if any.
fn first_point(collection: &FeatureCollection) -> Option<Coordinates> {
    let geometry = collection.features.first()?.geometry.as_ref()?;
    match &geometry.value {
        geojson::Value::Point(position) => Coordinates::from_position(position),
        _ => None,
    }
}

#[async_trait]
impl RoutingBackend for OpenRouteServiceClient {
    async fn nearest(
        &self,
        profile: TravelProfile,
        point: &Coordinates,
        radius_m: f64,
    ) -> Result<Option<Coordinates>> {
        let url = format!("{}/nearest/{}", self.base_url, profile.ors_profile());
        let point_param = format!("{},{}", point.lng, point.lat);
        let radius_param = format!("{}", radius_m.round() as i64);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("point", point_param.as_str()),
                ("number", "1"),
                ("radius", radius_param.as_str()),
            ])
            .header("Authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::routing(
                    format!("Nearest request failed: {}", e),
                    json!({ "message": e.to_string() }),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::routing(
                format!("Nearest HTTP {}", status),
                json!({ "message": error_text }),
            ));
        }

        let collection: FeatureCollection = response.json().await.map_err(|e| {
            AppError::routing(
                format!("Failed to parse nearest response: {}", e),
                Value::Null,
            )
        })?;

        Ok(first_point(&collection))
    }

    async fn directions(
        &self,
        profile: TravelProfile,
        from: &Coordinates,
        to: &Coordinates,
    ) -> RoutingOutcome {
        tracing::debug!(
            profile = %profile,
            "ORS directions request: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            from.lng, from.lat, to.lng, to.lat
        );
        self.post_directions(profile, json!({ "coordinates": [from, to] }))
            .await
    }

    async fn round_trip(
        &self,
        profile: TravelProfile,
        origin: &Coordinates,
        length_m: f64,
        seed: u32,
    ) -> RoutingOutcome {
        tracing::debug!(
            profile = %profile,
            length_m = length_m,
            seed = seed,
            "ORS round trip request: {:.0}m from ({:.4}, {:.4}), seed {}",
            length_m, origin.lng, origin.lat, seed
        );
        self.post_directions(
            profile,
            json!({
                "coordinates": [origin],
                "options": { "round_trip": { "length": length_m, "seed": seed } },
            }),
        )
        .await
    }
}
