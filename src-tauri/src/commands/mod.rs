//! Tauri command surface. Every command returns `Result<T, String>` where it
//! can fail; the string is the user-facing message from `EcoConnectError`.

pub mod auth;
pub mod chat;
pub mod community;
pub mod config;
pub mod footprint;
pub mod keychain;
pub mod subscriptions;
pub mod tips;
pub mod weather;
