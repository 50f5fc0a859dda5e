use crate::{
    Config, Location, Observation, QueryError,
    provider::{forecast::OpenMeteoForecast, geocoding::OpenMeteoGeocoder},
};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::{fmt::Debug, sync::Arc};

pub mod forecast;
pub mod geocoding;

const USER_AGENT: &str = concat!("weather-now/", env!("CARGO_PKG_VERSION"));

/// Turns a free-text place name into the provider's first match.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, query: &str) -> Result<Location, QueryError>;
}

/// Fetches the current observation at a coordinate.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_observation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Observation, QueryError>;
}

/// Build the HTTP client shared by both Open-Meteo providers.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Construct the Open-Meteo geocoder and forecast fetcher from config.
pub fn open_meteo_from_config(
    config: &Config,
) -> anyhow::Result<(Arc<dyn LocationResolver>, Arc<dyn WeatherFetcher>)> {
    config.validate()?;
    let http = http_client(config)?;

    let resolver: Arc<dyn LocationResolver> = Arc::new(OpenMeteoGeocoder::new(
        http.clone(),
        &config.geocoding.base_url,
        &config.geocoding.language,
    ));
    let fetcher: Arc<dyn WeatherFetcher> =
        Arc::new(OpenMeteoForecast::new(http, &config.forecast.base_url));

    Ok((resolver, fetcher))
}

/// Send a request and return the body of a successful response.
pub(crate) async fn fetch_body(request: RequestBuilder, service: &str) -> anyhow::Result<String> {
    let res = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {service}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{service} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    Ok(body)
}

pub(crate) fn join_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }

    #[test]
    fn join_url_tolerates_trailing_slash() {
        assert_eq!(join_url("http://x/v1/", "search"), "http://x/v1/search");
        assert_eq!(join_url("http://x/v1", "forecast"), "http://x/v1/forecast");
    }

    #[test]
    fn open_meteo_from_config_rejects_invalid_config() {
        let mut cfg = Config::default();
        cfg.geocoding.language = String::new();

        let err = open_meteo_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn open_meteo_from_config_works_with_defaults() {
        assert!(open_meteo_from_config(&Config::default()).is_ok());
    }
}
