use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State};
use tracing::{info, warn};

use crate::chat::{
    self, message_query, messages_collection, messages_from_snapshot, ChatMessage, ChatSummary,
    Contact,
};
use crate::state::AppState;
use crate::store::SubscriptionHandle;

pub const MESSAGES_EVENT: &str = "chat://messages";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesEvent {
    pub handle: SubscriptionHandle,
    pub chat_id: String,
    pub messages: Vec<ChatMessage>,
}

#[tauri::command]
pub fn list_chats() -> Vec<ChatSummary> {
    chat::list_chats()
}

#[tauri::command]
pub fn list_contacts() -> Vec<Contact> {
    chat::list_contacts()
}

#[tauri::command]
pub fn search_chats(query: String) -> Vec<ChatSummary> {
    chat::search_chats(&query)
}

#[tauri::command]
pub async fn list_messages(
    state: State<'_, AppState>,
    chat_id: String,
) -> Result<Vec<ChatMessage>, String> {
    let viewer = state.session.current_user();
    Ok(chat::list_messages(&state.store, &chat_id, viewer.as_ref())?)
}

/// Send a message. Blank content is a no-op and yields `None`.
#[tauri::command]
pub async fn send_message(
    state: State<'_, AppState>,
    chat_id: String,
    content: String,
) -> Result<Option<ChatMessage>, String> {
    let user = state.session.current_user();
    Ok(chat::send_message(&state.store, user.as_ref(), &chat_id, &content)?)
}

/// Watch one chat's messages. Each snapshot is emitted as a
/// `chat://messages` event, with `isCurrentUser` computed for whoever is
/// signed in when it is delivered.
#[tauri::command]
pub fn subscribe_chat(
    app: AppHandle,
    state: State<'_, AppState>,
    chat_id: String,
) -> Result<SubscriptionHandle, String> {
    let sub = state
        .store
        .subscribe(&messages_collection(&chat_id), message_query())?;
    let (handle, mut rx) = sub.into_parts();

    let task = tauri::async_runtime::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            let viewer = app.state::<AppState>().session.current_user();
            let event = MessagesEvent {
                handle,
                chat_id: chat_id.clone(),
                messages: messages_from_snapshot(&snapshot, viewer.as_ref()),
            };
            if let Err(e) = app.emit(MESSAGES_EVENT, event) {
                warn!("Failed to emit {}: {}", MESSAGES_EVENT, e);
            }
        }
    });
    state.subscriptions.track(handle, task);

    info!("Chat subscription {} started", handle.0);
    Ok(handle)
}
