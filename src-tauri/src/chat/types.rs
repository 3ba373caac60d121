use serde::{Deserialize, Serialize};

/// Collection holding chat metadata documents, keyed by chat id.
pub const CHATS_COLLECTION: &str = "chats";

/// Message collection of a chat.
pub fn messages_collection(chat_id: &str) -> String {
    format!("{}/{}/messages", CHATS_COLLECTION, chat_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Group,
    Direct,
}

impl ChatKind {
    /// Group chat ids are hyphenated slugs; anything else is a direct chat.
    pub fn from_chat_id(chat_id: &str) -> Self {
        if chat_id.contains('-') {
            ChatKind::Group
        } else {
            ChatKind::Direct
        }
    }
}

/// An entry of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub last_message: String,
    pub time: String,
    pub unread: u32,
    pub members: Option<u32>,
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub status: String,
    pub online: bool,
}

/// A message as shown to a particular viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: Option<String>,
    pub time_label: String,
    pub is_current_user: bool,
}

/// Stored shape of a message document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct MessageBody {
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: Option<String>,
}
