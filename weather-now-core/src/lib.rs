//! Core library for the `weather-now` CLI.
//!
//! This crate defines:
//! - The place name → coordinates → current observation pipeline
//! - Classification of WMO weather codes into coarse conditions
//! - Configuration of the Open-Meteo endpoints
//!
//! It is used by `weather-now-cli`, but any frontend can drive a
//! [`WeatherQuery`] and render its [`QueryState`].

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;

pub use condition::{Condition, classify};
pub use config::{Config, ForecastConfig, GeocodingConfig};
pub use error::QueryError;
pub use model::{Location, Observation, WeatherResult};
pub use provider::{LocationResolver, WeatherFetcher};
pub use query::{LOCATION_FAILURE, QueryState, Submission, WEATHER_FAILURE, WeatherQuery};
