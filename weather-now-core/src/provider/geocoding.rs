use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{Location, QueryError};

use super::{LocationResolver, fetch_body, join_url};

/// Place-name search against the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    results: Option<Vec<GeoCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeoCandidate> for Location {
    fn from(c: GeoCandidate) -> Self {
        Location {
            name: c.name,
            country: c.country.unwrap_or_default(),
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    async fn resolve(&self, query: &str) -> Result<Location, QueryError> {
        debug!(query, "geocoding place name");

        let request = self.http.get(join_url(&self.base_url, "search")).query(&[
            ("name", query),
            ("count", "1"),
            ("language", self.language.as_str()),
            ("format", "json"),
        ]);

        let body = fetch_body(request, "geocoding").await?;
        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        // Only the first candidate counts; no ranking of our own.
        let candidate = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| QueryError::NotFound(query.to_string()))?;

        let location = Location::from(candidate);
        info!(
            name = %location.name,
            country = %location.country,
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved location"
        );

        Ok(location)
    }
}
