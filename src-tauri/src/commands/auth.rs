use tauri::State;
use tracing::info;

use crate::auth::{SignInRequest, SignUpRequest, User};
use crate::state::AppState;

/// Create an account and sign it in.
#[tauri::command]
pub async fn sign_up(state: State<'_, AppState>, request: SignUpRequest) -> Result<User, String> {
    let user = state.users.sign_up(&request)?;
    state.session.set_user(user.clone());
    Ok(user)
}

#[tauri::command]
pub async fn sign_in(state: State<'_, AppState>, request: SignInRequest) -> Result<User, String> {
    let user = state.users.sign_in(&request)?;
    state.session.set_user(user.clone());
    Ok(user)
}

#[tauri::command]
pub fn sign_out(state: State<'_, AppState>) {
    info!("Signing out");
    state.session.sign_out();
}

#[tauri::command]
pub fn current_user(state: State<'_, AppState>) -> Option<User> {
    state.session.current_user()
}
