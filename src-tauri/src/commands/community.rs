use serde::Serialize;
use tauri::{AppHandle, Emitter, State};
use tracing::{info, warn};

use crate::community::{
    self, feed_query, posts_from_snapshot, CommunityDirectory, Post, POSTS_COLLECTION,
};
use crate::state::AppState;
use crate::store::SubscriptionHandle;

pub const POSTS_EVENT: &str = "community://posts";

#[derive(Debug, Clone, Serialize)]
pub struct PostsEvent {
    pub handle: SubscriptionHandle,
    pub posts: Vec<Post>,
}

#[tauri::command]
pub async fn list_posts(state: State<'_, AppState>) -> Result<Vec<Post>, String> {
    Ok(community::list_posts(&state.store, state.config.community.feed_limit)?)
}

#[tauri::command]
pub async fn create_post(state: State<'_, AppState>, content: String) -> Result<Post, String> {
    let user = state.session.current_user();
    Ok(community::create_post(&state.store, user.as_ref(), &content)?)
}

#[tauri::command]
pub async fn toggle_like(state: State<'_, AppState>, post_id: String) -> Result<Post, String> {
    let user = state.session.current_user();
    Ok(community::toggle_like(&state.store, user.as_ref(), &post_id)?)
}

#[tauri::command]
pub async fn add_comment(
    state: State<'_, AppState>,
    post_id: String,
    content: String,
) -> Result<Post, String> {
    let user = state.session.current_user();
    Ok(community::add_comment(&state.store, user.as_ref(), &post_id, &content)?)
}

#[tauri::command]
pub fn community_directory() -> CommunityDirectory {
    community::community_directory()
}

/// Watch the feed. Each snapshot is emitted as a `community://posts` event
/// tagged with the returned handle.
#[tauri::command]
pub fn subscribe_posts(app: AppHandle, state: State<'_, AppState>) -> Result<SubscriptionHandle, String> {
    let sub = state
        .store
        .subscribe(POSTS_COLLECTION, feed_query(state.config.community.feed_limit))?;
    let (handle, mut rx) = sub.into_parts();

    let task = tauri::async_runtime::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            let event = PostsEvent {
                handle,
                posts: posts_from_snapshot(&snapshot),
            };
            if let Err(e) = app.emit(POSTS_EVENT, event) {
                warn!("Failed to emit {}: {}", POSTS_EVENT, e);
            }
        }
    });
    state.subscriptions.track(handle, task);

    info!("Feed subscription {} started", handle.0);
    Ok(handle)
}
