use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// A geocoded place, as returned by the first geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a coordinate, in the provider's native units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kmh: f64,
    /// WMO code as reported; not range-checked.
    pub weather_code: i64,
    /// Provider-local timestamp of the observation, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location: Location,
    pub observation: Observation,
    pub condition: Condition,
}
