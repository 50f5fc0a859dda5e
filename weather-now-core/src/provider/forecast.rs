use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{Observation, QueryError};

use super::{WeatherFetcher, fetch_body, join_url};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current conditions from the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: i64,
}

impl From<CurrentBlock> for Observation {
    fn from(c: CurrentBlock) -> Self {
        let observed_at = c
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT).ok());

        Observation {
            temperature_c: c.temperature_2m,
            relative_humidity_pct: c.relative_humidity_2m,
            wind_speed_kmh: c.wind_speed_10m,
            weather_code: c.weather_code,
            observed_at,
        }
    }
}

#[async_trait]
impl WeatherFetcher for OpenMeteoForecast {
    async fn fetch_observation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Observation, QueryError> {
        debug!(latitude, longitude, "fetching current weather");

        let request = self.http.get(join_url(&self.base_url, "forecast")).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ]);

        let body = fetch_body(request, "forecast").await?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse forecast JSON")?;

        Ok(parsed.current.into())
    }
}
