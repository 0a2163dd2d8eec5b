use crate::constants::{DEFAULT_PLACE_CACHE_MAX_ENTRIES, REVERSE_GEOCODE_ZOOM};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{header::USER_AGENT, Client};
use serde::Deserialize;
use std::time::Duration;

/// Free-text and reverse geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for a free-text query, `None` if nothing matched.
    async fn forward_geocode(&self, query: &str) -> Result<Option<Coordinates>>;

    /// Short place name (village, town or suburb) for a coordinate.
    async fn reverse_geocode(&self, point: &Coordinates) -> Result<Option<String>>;
}

/// Nominatim client. Reverse lookups are cached on coordinates rounded to
/// ~100 m, since sampled key points from repeated plans land on the same towns.
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
    places: Cache<String, Option<String>>,
}

impl NominatimClient {
    pub fn new(base_url: String, user_agent: String, cache_ttl_seconds: u64) -> Self {
        let places = Cache::builder()
            .time_to_live(Duration::from_secs(cache_ttl_seconds))
            .max_capacity(DEFAULT_PLACE_CACHE_MAX_ENTRIES)
            .build();

        NominatimClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
            places,
        }
    }

    fn place_cache_key(point: &Coordinates) -> String {
        let rounded = point.round(3);
        format!("place:{:.3},{:.3}", rounded.lng, rounded.lat)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Geocoding(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse response: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    village: Option<String>,
    town: Option<String>,
    suburb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    #[serde(default)]
    address: Option<ReverseAddress>,
    #[serde(default)]
    display_name: Option<String>,
}

impl ReverseResult {
    /// Prefer the most local named settlement, then the head of the display name.
    fn place_name(self) -> Option<String> {
        let address = self.address.unwrap_or_default();
        address
            .village
            .or(address.town)
            .or(address.suburb)
            .or_else(|| {
                self.display_name
                    .and_then(|name| name.split(',').next().map(|s| s.trim().to_string()))
            })
            .filter(|name| !name.is_empty())
    }
}

fn parse_search_result(results: Vec<SearchResult>) -> Option<Coordinates> {
    let first = results.into_iter().next()?;
    let lng = first.lon.parse().ok()?;
    let lat = first.lat.parse().ok()?;
    Coordinates::new(lng, lat).ok()
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn forward_geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);
        let results: Vec<SearchResult> = self
            .get_json(
                &url,
                &[
                    ("q", query.to_string()),
                    ("format", "json".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let found = parse_search_result(results);
        tracing::debug!(query = query, found = ?found, "Forward geocode");
        Ok(found)
    }

    async fn reverse_geocode(&self, point: &Coordinates) -> Result<Option<String>> {
        let key = Self::place_cache_key(point);
        if let Some(cached) = self.places.get(&key).await {
            tracing::debug!("Place cache hit: {}", key);
            return Ok(cached);
        }

        let url = format!("{}/reverse", self.base_url);
        let result: ReverseResult = self
            .get_json(
                &url,
                &[
                    ("format", "json".to_string()),
                    ("lat", point.lat.to_string()),
                    ("lon", point.lng.to_string()),
                    ("zoom", REVERSE_GEOCODE_ZOOM.to_string()),
                ],
            )
            .await?;

        let name = result.place_name();
        self.places.insert(key, name.clone()).await;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reverse(json: &str) -> ReverseResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_place_name_preference() {
        let village = reverse(
            r#"{"address": {"village": "Grindelwald", "town": "Interlaken"}, "display_name": "Grindelwald, Bern"}"#,
        );
        assert_eq!(village.place_name().as_deref(), Some("Grindelwald"));

        let town = reverse(r#"{"address": {"town": "Thun", "suburb": "Lerchenfeld"}}"#);
        assert_eq!(town.place_name().as_deref(), Some("Thun"));

        let display = reverse(r#"{"address": {}, "display_name": "Bern, Bern-Mittelland, Switzerland"}"#);
        assert_eq!(display.place_name().as_deref(), Some("Bern"));

        let error = reverse(r#"{"error": "Unable to geocode"}"#);
        assert_eq!(error.place_name(), None);
    }

    #[test]
    fn test_parse_search_result() {
        let results: Vec<SearchResult> =
            serde_json::from_str(r#"[{"lat": "46.9480", "lon": "7.4474", "display_name": "Bern"}]"#)
                .unwrap();
        assert_eq!(
            parse_search_result(results),
            Some(Coordinates { lng: 7.4474, lat: 46.948 })
        );

        assert_eq!(parse_search_result(vec![]), None);

        let garbage = vec![SearchResult {
            lat: "north".to_string(),
            lon: "7.0".to_string(),
        }];
        assert_eq!(parse_search_result(garbage), None);
    }

    #[test]
    fn test_place_cache_key_rounds() {
        let a = Coordinates { lng: 7.44741, lat: 46.94801 };
        let b = Coordinates { lng: 7.44739, lat: 46.94799 };
        assert_eq!(
            NominatimClient::place_cache_key(&a),
            NominatimClient::place_cache_key(&b)
        );
        assert_eq!(NominatimClient::place_cache_key(&a), "place:7.447,46.948");
    }
}
