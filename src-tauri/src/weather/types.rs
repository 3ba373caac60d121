use serde::{Deserialize, Serialize};

pub const NOTICE_DEFAULT_LOCATION: &str = "Using default location";
pub const NOTICE_FETCH_FAILED: &str = "Could not load real-time weather data.";
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Degrees Fahrenheit.
    pub temperature: i64,
    /// Short condition group such as "Clear", "Clouds" or "Rain".
    pub condition: String,
    /// Percent.
    pub humidity: u32,
    /// Miles per hour.
    pub wind_speed: i64,
}

/// Icon family used by the weather card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Sun,
    Cloud,
    Rain,
    Thermometer,
}

impl WeatherIcon {
    pub fn for_condition(condition: &str) -> Self {
        match condition {
            "Clear" => WeatherIcon::Sun,
            "Clouds" => WeatherIcon::Cloud,
            "Rain" => WeatherIcon::Rain,
            _ => WeatherIcon::Thermometer,
        }
    }
}

/// Result of a lookup. Failures never surface as errors: the report simply
/// carries no reading and a notice for the toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location_name: String,
    pub reading: Option<WeatherReading>,
    pub icon: Option<WeatherIcon>,
    pub used_default_location: bool,
    pub notices: Vec<String>,
}

/// The subset of an OpenWeatherMap current-weather response we read.
#[derive(Debug, Deserialize)]
pub(crate) struct OwmResponse {
    #[serde(default)]
    pub name: Option<String>,
    pub main: OwmMain,
    pub weather: Vec<OwmCondition>,
    pub wind: OwmWind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCondition {
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmWind {
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_for_condition() {
        assert_eq!(WeatherIcon::for_condition("Clear"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::for_condition("Clouds"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::for_condition("Rain"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::for_condition("Haze"), WeatherIcon::Thermometer);
    }
}
