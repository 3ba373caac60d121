//! Conversations: a static chat and contact directory, and per-chat message
//! collections (`chats/{chatId}/messages`) in the document store.

mod directory;
mod messages;
mod types;

pub use directory::{find_chat, list_chats, list_contacts, search_chats};
pub use messages::{
    list_messages, message_from_document, message_query, messages_from_snapshot, send_message,
    MSG_SIGN_IN_TO_CHAT,
};
pub use types::{messages_collection, ChatKind, ChatMessage, ChatSummary, Contact, CHATS_COLLECTION};
