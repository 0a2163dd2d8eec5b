use crate::constants::FORECAST_DAYS;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, DailyForecast};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily forecasts for the trip days, starting tomorrow.
    async fn trip_forecast(&self, point: &Coordinates) -> Result<Vec<DailyForecast>>;
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: String) -> Self {
        OpenMeteoClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<i64>>,
}

impl DailySeries {
    /// Skip today, keep the next `FORECAST_DAYS` entries.
    fn trip_days(self) -> Vec<DailyForecast> {
        self.time
            .iter()
            .enumerate()
            .skip(1)
            .take(FORECAST_DAYS)
            .map(|(i, date)| DailyForecast {
                date: date.clone(),
                temp_max: self.temperature_2m_max.get(i).copied().flatten(),
                temp_min: self.temperature_2m_min.get(i).copied().flatten(),
                weathercode: self.weathercode.get(i).copied().flatten(),
            })
            .collect()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn trip_forecast(&self, point: &Coordinates) -> Result<Vec<DailyForecast>> {
        let url = format!("{}/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", point.lat.to_string()),
                ("longitude", point.lng.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Weather(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Weather(format!("HTTP {}", response.status())));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::Weather(format!("Failed to parse response: {}", e)))?;

        Ok(forecast.daily.trip_days())
    }
}
