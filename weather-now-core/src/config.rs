use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Geocoding endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub base_url: String,
    /// Language for returned place names.
    pub language: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODING_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Forecast endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub base_url: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_FORECAST_URL.to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 10
///
/// [geocoding]
/// base_url = "https://geocoding-api.open-meteo.com/v1"
/// language = "en"
///
/// [forecast]
/// base_url = "https://api.open-meteo.com/v1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub geocoding: GeocodingConfig,
    pub forecast: ForecastConfig,

    /// Per-request HTTP timeout. No timeout when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-now", "weather-now")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.geocoding.base_url.trim().is_empty(),
            "geocoding.base_url must not be empty"
        );
        ensure!(
            !self.forecast.base_url.trim().is_empty(),
            "forecast.base_url must not be empty"
        );
        ensure!(
            !self.geocoding.language.trim().is_empty(),
            "geocoding.language must not be empty"
        );
        ensure!(self.timeout_secs != Some(0), "timeout_secs must be greater than zero");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.geocoding.base_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.geocoding.language, "en");
        assert_eq!(cfg.forecast.base_url, DEFAULT_FORECAST_URL);
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").expect("empty config must parse");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            timeout_secs = 5

            [geocoding]
            language = "de"
            "#,
        )
        .expect("partial config must parse");

        assert_eq!(cfg.geocoding.language, "de");
        assert_eq!(cfg.geocoding.base_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast.base_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut cfg = Config::default();
        cfg.forecast.base_url = "http://localhost:8080/v1".into();
        cfg.timeout_secs = Some(3);

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed = Config::from_toml(&text).expect("parse");

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = Config::from_toml("[forecast]\nbase_url = \"  \"\n").unwrap_err();
        assert!(format!("{err:#}").contains("forecast.base_url"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = Config { timeout_secs: Some(0), ..Config::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
