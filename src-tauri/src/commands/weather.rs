use tauri::State;
use tracing::warn;

use crate::state::AppState;
use crate::weather::{Coordinates, WeatherReport, WEATHER_KEY_SERVICE};

use super::keychain::read_api_key;

/// Current weather at the device position, or at the default location when
/// the frontend could not get one. Failures come back as report notices.
#[tauri::command]
pub async fn get_weather(
    state: State<'_, AppState>,
    coords: Option<Coordinates>,
) -> Result<WeatherReport, String> {
    let api_key = read_api_key(WEATHER_KEY_SERVICE).unwrap_or_else(|e| {
        warn!("Weather API key unavailable: {}", e);
        None
    });
    Ok(state.weather.lookup(coords, api_key.as_deref()).await)
}
