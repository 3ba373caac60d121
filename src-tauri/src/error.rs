use thiserror::Error;

/// Banner text shown for failures the user cannot fix by editing a form.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum EcoConnectError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Keychain error: {0}")]
    Keychain(String),
}

impl EcoConnectError {
    /// Message suitable for the UI.
    ///
    /// Validation and auth failures are shown verbatim so the user can
    /// correct the form; everything else collapses into a generic banner.
    pub fn user_message(&self) -> String {
        match self {
            EcoConnectError::Validation(msg) | EcoConnectError::Auth(msg) => msg.clone(),
            EcoConnectError::PermissionDenied(_) => {
                "You don't have permission to do that.".to_string()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<rusqlite::Error> for EcoConnectError {
    fn from(err: rusqlite::Error) -> Self {
        EcoConnectError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for EcoConnectError {
    fn from(err: serde_json::Error) -> Self {
        EcoConnectError::Store(format!("Invalid document JSON: {}", err))
    }
}

impl From<EcoConnectError> for String {
    fn from(err: EcoConnectError) -> Self {
        err.user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_passes_through() {
        let err = EcoConnectError::Validation("Passwords do not match.".to_string());
        assert_eq!(String::from(err), "Passwords do not match.");
    }

    #[test]
    fn test_store_error_maps_to_generic_banner() {
        let err = EcoConnectError::Store("disk I/O error".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn test_permission_denied_message() {
        let err = EcoConnectError::PermissionDenied("chats/eco-warriors".to_string());
        assert!(err.user_message().contains("permission"));
    }
}
