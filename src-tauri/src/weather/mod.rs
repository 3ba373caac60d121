//! Current weather from OpenWeatherMap, with a default-location fallback
//! when the device position is unavailable.
//!
//! # Example
//!
//! ```ignore
//! use ecoconnect_tauri::weather::{Coordinates, WeatherClient};
//!
//! let client = WeatherClient::new(config.weather.clone())?;
//! let report = client.lookup(None, Some(&api_key)).await;
//! // report.location_name == "Shirpur", report.notices[0] == "Using default location"
//! ```

mod client;
mod types;

/// Keychain service holding the OpenWeatherMap API key.
pub const WEATHER_KEY_SERVICE: &str = "ecoconnect-weather-api";

pub use client::{parse_current_weather, WeatherClient};
pub use types::{
    Coordinates, WeatherIcon, WeatherReading, WeatherReport, NOTICE_DEFAULT_LOCATION,
    NOTICE_FETCH_FAILED, UNKNOWN_LOCATION,
};
