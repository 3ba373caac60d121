//! Realtime document store backing the community feed and chat.
//!
//! Documents are JSON objects grouped into slash-separated collections
//! (`communityPosts`, `chats`, `chats/{chatId}/messages`). Data lives in a
//! single SQLite table; writes fan out as [`Snapshot`]s to the
//! subscribers of the written collection.
//!
//! # Example
//!
//! ```ignore
//! use ecoconnect_tauri::store::{DocumentStore, Query};
//!
//! let store = DocumentStore::in_memory()?;
//! let mut sub = store.subscribe("communityPosts", Query::newest_first())?;
//! store.add("communityPosts", serde_json::json!({"content": "hi"}))?;
//! let latest = sub.next().await;
//! ```

mod document_store;
mod subscription;
mod types;

pub use document_store::DocumentStore;
pub use subscription::{Subscription, SubscriptionHandle};
pub use types::{Document, FieldUpdate, Query, Snapshot, SortOrder};
