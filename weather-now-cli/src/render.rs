//! Text rendering of a query's state. Reads state only, never drives it.

use weather_now_core::{QueryState, WeatherResult};

pub fn title() -> &'static str {
    "Weather Now"
}

pub fn render(state: &QueryState) -> String {
    match state {
        QueryState::Idle => "Enter a city name to see the current weather.".to_string(),
        QueryState::Pending => "Loading weather data...".to_string(),
        QueryState::Failed(reason) => format!("Error: {reason}"),
        QueryState::Resolved(result) => render_result(result),
    }
}

fn render_result(result: &WeatherResult) -> String {
    let location = &result.location;
    let obs = &result.observation;

    let heading = if location.country.is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country)
    };

    let mut lines = vec![
        heading,
        result.condition.label().to_string(),
        format!("Temperature: {}°C", obs.temperature_c),
        format!("Humidity:    {}%", obs.relative_humidity_pct),
        format!("Wind Speed:  {} km/h", obs.wind_speed_kmh),
    ];
    if let Some(at) = obs.observed_at {
        lines.push(format!("Observed:    {}", at.format("%Y-%m-%d %H:%M")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_now_core::{Condition, Location, Observation};

    fn berlin(country: &str) -> WeatherResult {
        WeatherResult {
            location: Location {
                name: "Berlin".into(),
                country: country.into(),
                latitude: 52.52,
                longitude: 13.41,
            },
            observation: Observation {
                temperature_c: 18.3,
                relative_humidity_pct: 55.0,
                wind_speed_kmh: 12.1,
                weather_code: 2,
                observed_at: None,
            },
            condition: Condition::Clear,
        }
    }

    #[test]
    fn pending_shows_loading() {
        assert_eq!(render(&QueryState::Pending), "Loading weather data...");
    }

    #[test]
    fn failure_shows_reason() {
        let out = render(&QueryState::Failed("Failed to find location".into()));
        assert_eq!(out, "Error: Failed to find location");
    }

    #[test]
    fn resolved_shows_all_measurements() {
        let out = render(&QueryState::Resolved(berlin("Germany")));

        assert!(out.starts_with("Berlin, Germany\nClear/Partly Cloudy\n"));
        assert!(out.contains("18.3°C"));
        assert!(out.contains("55%"));
        assert!(out.contains("12.1 km/h"));
        assert!(!out.contains("Observed"));
    }

    #[test]
    fn missing_country_drops_separator() {
        let out = render(&QueryState::Resolved(berlin("")));
        assert!(out.starts_with("Berlin\n"));
    }
}
