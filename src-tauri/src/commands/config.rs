//! UI preferences persisted with tauri-plugin-store.

use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::error::EcoConnectError;

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const THEME_KEY: &str = "theme";
pub const THEMES: &[&str] = &["light", "dark", "system"];

/// Reject values the UI could not apply.
pub fn validate_preference(key: &str, value: &str) -> Result<(), EcoConnectError> {
    if key.trim().is_empty() {
        return Err(EcoConnectError::Validation("Preference key cannot be empty".to_string()));
    }
    if key == THEME_KEY && !THEMES.contains(&value) {
        return Err(EcoConnectError::Validation(format!("Unknown theme: {}", value)));
    }
    Ok(())
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open {}: {}", PREFERENCES_FILE, e);
        EcoConnectError::Config(e.to_string())
    })?;
    Ok(store.get(key).and_then(|v| v.as_str().map(str::to_string)))
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    validate_preference(key, value)?;
    info!("Setting preference {} = {}", key, value);
    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open {}: {}", PREFERENCES_FILE, e);
        EcoConnectError::Config(e.to_string())
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save {}: {}", PREFERENCES_FILE, e);
        EcoConnectError::Config(e.to_string()).into()
    })
}
