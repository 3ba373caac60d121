pub mod auth;
pub mod chat;
mod commands;
pub mod community;
pub mod config;
pub mod error;
pub mod footprint;
pub mod state;
pub mod store;
pub mod timefmt;
pub mod tips;
pub mod weather;

pub use error::EcoConnectError;
pub use state::AppState;

/// Event carrying the signed-in user (or `null`) after every auth change.
pub const AUTH_EVENT: &str = "auth://state";

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::footprint::calculate_footprint,
            commands::footprint::default_profile,
            commands::tips::list_tips,
            commands::tips::filter_tips,
            commands::tips::daily_tip,
            commands::auth::sign_up,
            commands::auth::sign_in,
            commands::auth::sign_out,
            commands::auth::current_user,
            commands::community::list_posts,
            commands::community::create_post,
            commands::community::toggle_like,
            commands::community::add_comment,
            commands::community::community_directory,
            commands::community::subscribe_posts,
            commands::chat::list_chats,
            commands::chat::list_contacts,
            commands::chat::search_chats,
            commands::chat::list_messages,
            commands::chat::send_message,
            commands::chat::subscribe_chat,
            commands::subscriptions::unsubscribe,
            commands::weather::get_weather,
            commands::keychain::set_api_key,
            commands::keychain::get_api_key,
            commands::keychain::delete_api_key,
            commands::config::get_preference,
            commands::config::set_preference,
        ])
        .setup(|app| {
            use tauri::{Emitter, Manager};

            let data_dir = app.path().app_data_dir()?;
            let config_dir = app.path().app_config_dir()?;
            let config = config::resolve_config(&config_dir);
            let catalog = state::resolve_catalog(&config_dir);
            let app_state = AppState::open(&data_dir, config, catalog)?;

            // Forward auth-state changes to the frontend
            let mut auth_rx = app_state.session.watch();
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                while auth_rx.changed().await.is_ok() {
                    let user = auth_rx.borrow_and_update().clone();
                    if let Err(e) = handle.emit(AUTH_EVENT, user) {
                        tracing::warn!("Failed to emit {}: {}", AUTH_EVENT, e);
                    }
                }
            });

            app.manage(app_state);
            tracing::info!("EcoConnect backend ready, data in {:?}", data_dir);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
