use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::config::WeatherConfig;
use crate::error::EcoConnectError;

use super::types::{
    Coordinates, OwmResponse, WeatherIcon, WeatherReading, WeatherReport,
    NOTICE_DEFAULT_LOCATION, NOTICE_FETCH_FAILED, UNKNOWN_LOCATION,
};

/// Parse an OpenWeatherMap current-weather body into the API's location
/// name and a rounded reading.
pub fn parse_current_weather(body: &str) -> Result<(Option<String>, WeatherReading), EcoConnectError> {
    let resp: OwmResponse = serde_json::from_str(body)
        .map_err(|e| EcoConnectError::Weather(format!("Failed to parse weather response: {}", e)))?;

    let condition = resp
        .weather
        .first()
        .map(|w| w.main.clone())
        .ok_or_else(|| EcoConnectError::Weather("Weather response has no conditions".to_string()))?;

    let name = resp.name.filter(|n| !n.trim().is_empty());
    Ok((
        name,
        WeatherReading {
            temperature: resp.main.temp.round() as i64,
            condition,
            humidity: resp.main.humidity.round().max(0.0) as u32,
            wind_speed: resp.wind.speed.round() as i64,
        },
    ))
}

/// HTTP client for the current-weather endpoint.
pub struct WeatherClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self, EcoConnectError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EcoConnectError::Weather(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    fn request_url(&self, coords: Coordinates, api_key: &str) -> Result<Url, EcoConnectError> {
        Url::parse_with_params(
            &self.endpoint(),
            &[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", self.config.units.clone()),
                ("appid", api_key.to_string()),
            ],
        )
        .map_err(|e| EcoConnectError::Config(format!("Invalid weather base_url: {}", e)))
    }

    /// Fetch the current weather at `coords`.
    pub async fn fetch(
        &self,
        coords: Coordinates,
        api_key: &str,
    ) -> Result<(Option<String>, WeatherReading), EcoConnectError> {
        let url = self.request_url(coords, api_key)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                let msg = if e.is_timeout() {
                    format!("Weather API timeout after {}s", self.config.timeout_secs)
                } else {
                    format!("Weather API request failed: {}", e)
                };
                EcoConnectError::Weather(msg)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EcoConnectError::Weather(format!("Weather API error: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EcoConnectError::Weather(format!("Failed to read weather response: {}", e)))?;
        parse_current_weather(&body)
    }

    /// Look up the weather at `coords`, or at the configured default location
    /// when the device position is unavailable. Never fails.
    pub async fn lookup(&self, coords: Option<Coordinates>, api_key: Option<&str>) -> WeatherReport {
        let default = &self.config.default_location;
        let used_default_location = coords.is_none();
        let coords = coords.unwrap_or(Coordinates {
            latitude: default.latitude,
            longitude: default.longitude,
        });

        let mut notices = Vec::new();
        if used_default_location {
            notices.push(NOTICE_DEFAULT_LOCATION.to_string());
        }
        let fallback_name = if used_default_location {
            default.name.clone()
        } else {
            UNKNOWN_LOCATION.to_string()
        };

        let result = match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => self.fetch(coords, key).await,
            None => Err(EcoConnectError::Weather("No weather API key configured".to_string())),
        };

        match result {
            Ok((api_name, reading)) => {
                let location_name = if used_default_location {
                    default.name.clone()
                } else {
                    api_name.unwrap_or(fallback_name)
                };
                info!("Weather for {}: {} {}F", location_name, reading.condition, reading.temperature);
                WeatherReport {
                    location_name,
                    icon: Some(WeatherIcon::for_condition(&reading.condition)),
                    reading: Some(reading),
                    used_default_location,
                    notices,
                }
            }
            Err(e) => {
                warn!("{}", e);
                notices.push(NOTICE_FETCH_FAILED.to_string());
                WeatherReport {
                    location_name: fallback_name,
                    reading: None,
                    icon: None,
                    used_default_location,
                    notices,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    const FIXTURE: &str = r#"{
        "coord": {"lon": 74.88, "lat": 21.35},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 91.56, "feels_like": 95.2, "humidity": 38, "pressure": 1008},
        "wind": {"speed": 7.49, "deg": 280},
        "name": "Shirpur"
    }"#;

    fn unreachable_client() -> WeatherClient {
        let mut config = default_config().weather;
        config.base_url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        WeatherClient::new(config).unwrap()
    }

    #[test]
    fn test_parse_current_weather_rounds() {
        let (name, reading) = parse_current_weather(FIXTURE).unwrap();
        assert_eq!(name.as_deref(), Some("Shirpur"));
        assert_eq!(reading.temperature, 92);
        assert_eq!(reading.condition, "Clear");
        assert_eq!(reading.humidity, 38);
        assert_eq!(reading.wind_speed, 7);
    }

    #[test]
    fn test_parse_negative_temperature() {
        let body = r#"{"weather":[{"main":"Snow"}],"main":{"temp":-3.6,"humidity":80},"wind":{"speed":0.4}}"#;
        let (name, reading) = parse_current_weather(body).unwrap();
        assert!(name.is_none());
        assert_eq!(reading.temperature, -4);
        assert_eq!(reading.wind_speed, 0);
    }

    #[test]
    fn test_parse_rejects_missing_conditions() {
        let body = r#"{"weather":[],"main":{"temp":50,"humidity":10},"wind":{"speed":1}}"#;
        assert!(parse_current_weather(body).is_err());
        assert!(parse_current_weather("<html>").is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = default_config().weather;
        config.base_url = "https://example.test/data/2.5/".to_string();
        let client = WeatherClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/data/2.5/weather");
    }

    #[test]
    fn test_request_url_query() {
        let client = WeatherClient::new(default_config().weather).unwrap();
        let url = client
            .request_url(
                Coordinates {
                    latitude: 37.7749,
                    longitude: -122.4194,
                },
                "abc",
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?lat=37.7749&lon=-122.4194&units=imperial&appid=abc"
        );
    }

    #[tokio::test]
    async fn test_lookup_without_key_uses_fallback() {
        let client = unreachable_client();
        let report = client.lookup(None, None).await;
        assert_eq!(report.location_name, "Shirpur");
        assert!(report.used_default_location);
        assert!(report.reading.is_none());
        assert_eq!(
            report.notices,
            vec![NOTICE_DEFAULT_LOCATION.to_string(), NOTICE_FETCH_FAILED.to_string()]
        );
    }

    #[tokio::test]
    async fn test_lookup_network_failure_is_not_an_error() {
        let client = unreachable_client();
        let coords = Coordinates {
            latitude: 19.07,
            longitude: 72.87,
        };
        let report = client.lookup(Some(coords), Some("key")).await;
        assert!(!report.used_default_location);
        assert_eq!(report.location_name, UNKNOWN_LOCATION);
        assert_eq!(report.notices, vec![NOTICE_FETCH_FAILED.to_string()]);
    }
}
