//! Shared state managed by Tauri and handed to every command.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tauri::async_runtime::JoinHandle;
use tracing::{info, warn};

use crate::auth::{AuthSession, UserDirectory};
use crate::config::AppConfig;
use crate::error::EcoConnectError;
use crate::store::{DocumentStore, SubscriptionHandle};
use crate::tips::{default_catalog, load_catalog, TipCatalog};
use crate::weather::WeatherClient;

pub const STORE_DB_FILE: &str = "ecoconnect.db";
pub const USERS_DB_FILE: &str = "users.db";
/// Optional catalog override in the app config directory.
pub const TIPS_FILE_NAME: &str = "tips.toml";

/// Forwarding tasks for live subscriptions, keyed by store handle.
#[derive(Default)]
pub struct SubscriptionRegistry {
    tasks: Mutex<HashMap<SubscriptionHandle, JoinHandle<()>>>,
}

impl SubscriptionRegistry {
    pub fn track(&self, handle: SubscriptionHandle, task: JoinHandle<()>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.insert(handle, task);
        }
    }

    /// Stop the forwarding task for `handle`. Returns false if unknown.
    pub fn cancel(&self, handle: SubscriptionHandle) -> bool {
        let task = self.tasks.lock().ok().and_then(|mut t| t.remove(&handle));
        match task {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub catalog: TipCatalog,
    pub store: Arc<DocumentStore>,
    pub users: UserDirectory,
    pub session: AuthSession,
    pub weather: WeatherClient,
    pub subscriptions: SubscriptionRegistry,
    /// Index of the daily tip currently on screen.
    pub daily_tip: Mutex<Option<usize>>,
}

/// Catalog from `tips.toml` in the config directory, else the built-in one.
pub fn resolve_catalog(config_dir: &Path) -> TipCatalog {
    let path = config_dir.join(TIPS_FILE_NAME);
    if !path.exists() {
        return default_catalog();
    }
    match load_catalog(&path) {
        Ok(catalog) => {
            info!("Loaded tip catalog from {:?}", path);
            catalog
        }
        Err(e) => {
            warn!("Ignoring invalid tip catalog {:?}: {}", path, e);
            default_catalog()
        }
    }
}

impl AppState {
    /// Open the databases under `data_dir`.
    pub fn open(data_dir: &Path, config: AppConfig, catalog: TipCatalog) -> Result<Self, EcoConnectError> {
        let store = DocumentStore::open(&data_dir.join(STORE_DB_FILE))?;
        let users = UserDirectory::open(&data_dir.join(USERS_DB_FILE))?;
        Self::with_parts(config, catalog, store, users)
    }

    /// State backed by in-memory databases.
    pub fn in_memory(config: AppConfig) -> Result<Self, EcoConnectError> {
        Self::with_parts(
            config,
            default_catalog(),
            DocumentStore::in_memory()?,
            UserDirectory::in_memory()?,
        )
    }

    fn with_parts(
        config: AppConfig,
        catalog: TipCatalog,
        store: DocumentStore,
        users: UserDirectory,
    ) -> Result<Self, EcoConnectError> {
        let weather = WeatherClient::new(config.weather.clone())?;
        Ok(Self {
            config,
            catalog,
            store: Arc::new(store),
            users,
            session: AuthSession::new(),
            weather,
            subscriptions: SubscriptionRegistry::default(),
            daily_tip: Mutex::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cancel_aborts_tracked_task() {
        let registry = SubscriptionRegistry::default();
        let (alive, mut watcher) = tokio::sync::mpsc::channel::<()>(1);
        let task = tauri::async_runtime::spawn(async move {
            let _alive = alive;
            std::future::pending::<()>().await;
        });
        registry.track(SubscriptionHandle(7), task);
        assert_eq!(registry.len(), 1);

        assert!(registry.cancel(SubscriptionHandle(7)));
        assert!(registry.is_empty());
        // The aborted task drops its sender, closing the channel
        let closed = tokio::time::timeout(Duration::from_secs(5), watcher.recv())
            .await
            .unwrap();
        assert!(closed.is_none());

        assert!(!registry.cancel(SubscriptionHandle(7)));
        assert!(!registry.cancel(SubscriptionHandle(99)));
    }

    #[test]
    fn test_open_creates_databases() {
        let dir = TempDir::new().unwrap();
        let state = AppState::open(dir.path(), default_config(), default_catalog()).unwrap();
        assert!(dir.path().join(STORE_DB_FILE).exists());
        assert!(dir.path().join(USERS_DB_FILE).exists());
        assert!(state.session.current_user().is_none());
        assert!(state.subscriptions.is_empty());
    }

    #[test]
    fn test_resolve_catalog_falls_back_on_bad_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_catalog(dir.path()), default_catalog());

        std::fs::write(dir.path().join(TIPS_FILE_NAME), "[[tips]]\nid = \"x\"").unwrap();
        assert_eq!(resolve_catalog(dir.path()), default_catalog());
    }

    #[test]
    fn test_resolve_catalog_reads_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(TIPS_FILE_NAME),
            r#"
            daily = ["Turn it off."]

            [[tips]]
            id = 7
            title = "Air-dry laundry"
            description = "Skip the dryer."
            category = "Energy"
            difficulty = "Easy"
            impact = "Medium"
            "#,
        )
        .unwrap();
        let catalog = resolve_catalog(dir.path());
        assert_eq!(catalog.tips.len(), 1);
        assert_eq!(catalog.tips[0].id, 7);
    }
}
