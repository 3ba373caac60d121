//! Application settings loaded from TOML.
//!
//! Provides two loading methods, mirroring the tip catalog:
//! - `default_config()` - The settings embedded in the binary
//! - `load_config(path)` - Settings from a file, with missing keys taken from defaults

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default settings embedded in the binary at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/ecoconnect.toml");

/// File name looked up in the app config directory for user overrides.
pub const CONFIG_FILE_NAME: &str = "ecoconnect.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub tips: TipsConfig,
    pub weather: WeatherConfig,
    pub community: CommunityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TipsConfig {
    pub rotation_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub units: String,
    pub timeout_secs: u64,
    pub default_location: DefaultLocation,
}

/// Location used when the device position is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommunityConfig {
    pub feed_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            calculator: CalculatorConfig::default(),
            tips: TipsConfig::default(),
            weather: WeatherConfig::default(),
            community: CommunityConfig::default(),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            rotation_delay_ms: 500,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            units: "imperial".to_string(),
            timeout_secs: 10,
            default_location: DefaultLocation::default(),
        }
    }
}

impl Default for DefaultLocation {
    fn default() -> Self {
        Self {
            name: "Shirpur".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self { feed_limit: 50 }
    }
}

/// Parse settings from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    Ok(config)
}

/// Load settings from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Get the settings embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_config() -> AppConfig {
    parse_config(DEFAULT_CONFIG).expect("embedded ecoconnect.toml must be valid TOML")
}

/// Resolve the effective settings for a config directory.
///
/// A missing override file is normal; a broken one is logged and ignored so
/// the app still starts with defaults.
pub fn resolve_config(config_dir: &Path) -> AppConfig {
    let path = config_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return default_config();
    }
    match load_config(&path) {
        Ok(config) => {
            info!("Loaded settings override from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring invalid settings file {:?}: {}", path, e);
            default_config()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.calculator.delay_ms, 1500);
        assert_eq!(config.tips.rotation_delay_ms, 500);
        assert_eq!(config.weather.units, "imperial");
        assert_eq!(config.weather.default_location.name, "Shirpur");
        assert_eq!(config.community.feed_limit, 50);
    }

    #[test]
    fn test_embedded_matches_struct_defaults() {
        assert_eq!(default_config(), AppConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config("[calculator]\ndelay_ms = 10\n").unwrap();
        assert_eq!(config.calculator.delay_ms, 10);
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.weather.default_location.latitude, 37.7749);
    }

    #[test]
    fn test_resolve_config_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_config(dir.path()), default_config());
    }

    #[test]
    fn test_resolve_config_invalid_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "calculator = [").unwrap();
        assert_eq!(resolve_config(dir.path()), default_config());
    }

    #[test]
    fn test_resolve_config_reads_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[weather.default_location]\nname = \"Pune\"\nlatitude = 18.52\nlongitude = 73.85\n",
        )
        .unwrap();
        let config = resolve_config(dir.path());
        assert_eq!(config.weather.default_location.name, "Pune");
        assert_eq!(config.calculator.delay_ms, 1500);
    }
}
