//! API keys kept in the OS keychain rather than in preferences.

use keyring::Entry;
use tracing::{info, warn};

use crate::error::EcoConnectError;
use crate::weather::WEATHER_KEY_SERVICE;

/// Account name under which every EcoConnect secret is stored.
pub const KEYCHAIN_USER: &str = "ecoconnect";

/// Keychain services the frontend may read or write.
pub const KNOWN_SERVICES: &[&str] = &[WEATHER_KEY_SERVICE];

fn entry(service: &str) -> Result<Entry, EcoConnectError> {
    if !KNOWN_SERVICES.contains(&service) {
        return Err(EcoConnectError::Validation(format!(
            "Unknown key service: {}",
            service
        )));
    }
    Entry::new(service, KEYCHAIN_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        EcoConnectError::Keychain(e.to_string())
    })
}

/// Read a stored key. A missing entry is `Ok(None)`.
pub fn read_api_key(service: &str) -> Result<Option<String>, EcoConnectError> {
    match entry(service)?.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => {
            info!("No API key stored for {}", service);
            Ok(None)
        }
        Err(e) => {
            warn!("Failed to read API key for {}: {}", service, e);
            Err(EcoConnectError::Keychain(e.to_string()))
        }
    }
}

#[tauri::command]
pub fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err(EcoConnectError::Validation("API key cannot be empty".to_string()).into());
    }
    info!("Storing API key for {}", service);
    entry(service)?.set_password(key.trim()).map_err(|e| {
        warn!("Failed to store API key for {}: {}", service, e);
        EcoConnectError::Keychain(e.to_string()).into()
    })
}

#[tauri::command]
pub fn get_api_key(service: &str) -> Result<Option<String>, String> {
    Ok(read_api_key(service)?)
}

/// Remove a stored key. Deleting a key that was never stored succeeds.
#[tauri::command]
pub fn delete_api_key(service: &str) -> Result<(), String> {
    info!("Deleting API key for {}", service);
    match entry(service)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => {
            warn!("Failed to delete API key for {}: {}", service, e);
            Err(EcoConnectError::Keychain(e.to_string()).into())
        }
    }
}
