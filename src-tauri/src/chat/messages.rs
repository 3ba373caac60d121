use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::auth::User;
use crate::error::EcoConnectError;
use crate::store::{Document, DocumentStore, Query, Snapshot};
use crate::timefmt::label_rfc3339;

use super::directory::find_chat;
use super::types::{messages_collection, ChatKind, ChatMessage, MessageBody, CHATS_COLLECTION};

pub const MSG_SIGN_IN_TO_CHAT: &str = "You need to be signed in to send messages";

fn check_chat_id(chat_id: &str) -> Result<(), EcoConnectError> {
    if chat_id.is_empty() || chat_id.contains('/') {
        return Err(EcoConnectError::Validation(format!("Invalid chat id: '{}'", chat_id)));
    }
    Ok(())
}

/// Oldest-first query used by the message pane.
pub fn message_query() -> Query {
    Query::oldest_first()
}

pub fn message_from_document(
    doc: &Document,
    viewer: Option<&User>,
) -> Result<ChatMessage, EcoConnectError> {
    let body: MessageBody = doc.decode()?;
    Ok(ChatMessage {
        id: doc.id.clone(),
        is_current_user: viewer.is_some_and(|u| u.uid == body.sender_id),
        time_label: label_rfc3339(body.timestamp.as_deref()),
        sender: body.sender_name,
        sender_id: body.sender_id,
        content: body.content,
        timestamp: body.timestamp,
    })
}

/// Decode a message snapshot for `viewer`, skipping malformed documents.
pub fn messages_from_snapshot(snapshot: &Snapshot, viewer: Option<&User>) -> Vec<ChatMessage> {
    snapshot
        .documents
        .iter()
        .filter_map(|doc| match message_from_document(doc, viewer) {
            Ok(msg) => Some(msg),
            Err(e) => {
                debug!("Skipping malformed message {}: {}", doc.id, e);
                None
            }
        })
        .collect()
}

pub fn list_messages(
    store: &DocumentStore,
    chat_id: &str,
    viewer: Option<&User>,
) -> Result<Vec<ChatMessage>, EcoConnectError> {
    check_chat_id(chat_id)?;
    let docs = store.query(&messages_collection(chat_id), &message_query())?;
    docs.iter().map(|d| message_from_document(d, viewer)).collect()
}

/// Send a message. Returns `Ok(None)` without writing anything when the
/// content is blank. The first message in a chat creates its metadata.
pub fn send_message(
    store: &DocumentStore,
    user: Option<&User>,
    chat_id: &str,
    content: &str,
) -> Result<Option<ChatMessage>, EcoConnectError> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    check_chat_id(chat_id)?;
    let user = user.ok_or_else(|| EcoConnectError::Auth(MSG_SIGN_IN_TO_CHAT.to_string()))?;

    if store.get(CHATS_COLLECTION, chat_id)?.is_none() {
        let kind = find_chat(chat_id)
            .map(|c| c.kind)
            .unwrap_or_else(|| ChatKind::from_chat_id(chat_id));
        store.set(
            CHATS_COLLECTION,
            chat_id,
            json!({
                "createdAt": Utc::now().to_rfc3339(),
                "members": [user.uid],
                "type": kind,
            }),
        )?;
        info!("Created chat metadata for {}", chat_id);
    }

    let doc = store.add(
        &messages_collection(chat_id),
        json!({
            "senderId": user.uid,
            "senderName": user.name_or_anonymous(),
            "content": content,
            "timestamp": Utc::now().to_rfc3339(),
        }),
    )?;

    debug!("User {} sent message {} to {}", user.uid, doc.id, chat_id);
    message_from_document(&doc, Some(user)).map(Some)
}
