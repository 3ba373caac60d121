use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::EcoConnectError;

use super::subscription::{Subscription, SubscriptionHandle};
use super::types::{Document, FieldUpdate, Query, Snapshot, SortOrder};

/// Length of generated document ids.
const DOCUMENT_ID_LEN: usize = 20;

struct Subscriber {
    handle: SubscriptionHandle,
    collection: String,
    query: Query,
    tx: mpsc::UnboundedSender<Snapshot>,
}

/// SQLite-backed store of JSON documents grouped into named collections.
///
/// Every write to a collection pushes a fresh snapshot to that collection's
/// subscribers, in write order. The connection and the subscriber table are
/// each behind a mutex; the connection lock is never held while snapshots
/// are delivered.
pub struct DocumentStore {
    conn: Mutex<Connection>,
    subscribers: Mutex<Vec<Subscriber>>,
    next_handle: AtomicU64,
    version: AtomicU64,
}

fn lock_poisoned<T>(_: T) -> EcoConnectError {
    EcoConnectError::Store("store lock poisoned".to_string())
}

fn check_collection(collection: &str) -> Result<(), EcoConnectError> {
    if collection.trim().is_empty() || collection.starts_with('/') || collection.ends_with('/') {
        return Err(EcoConnectError::Validation(format!(
            "Invalid collection name: '{}'",
            collection
        )));
    }
    Ok(())
}

fn into_object(data: Value) -> Result<Map<String, Value>, EcoConnectError> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(EcoConnectError::Validation(format!(
            "Documents must be JSON objects, got: {}",
            other
        ))),
    }
}

fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}

fn document_from_row(row: &Row<'_>) -> rusqlite::Result<(Document, String)> {
    Ok((
        Document {
            seq: row.get(0)?,
            collection: row.get(1)?,
            id: row.get(2)?,
            data: Map::new(),
            created_at: row.get(4)?,
        },
        row.get::<_, String>(3)?,
    ))
}

fn with_body((mut doc, json): (Document, String)) -> Result<Document, EcoConnectError> {
    doc.data = into_object(serde_json::from_str(&json)?)?;
    Ok(doc)
}

impl DocumentStore {
    /// Open or create the store database at the given path.
    pub fn open(db_path: &Path) -> Result<Self, EcoConnectError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EcoConnectError::Store(format!("Failed to create data dir: {}", e)))?;
        }
        let conn = Connection::open(db_path)?;
        let store = Self::with_connection(conn)?;
        info!("Opened document store at {:?}", db_path);
        Ok(store)
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Result<Self, EcoConnectError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, EcoConnectError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data_json TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(collection, id)
            );
            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            subscribers: Mutex::new(Vec::new()),
            next_handle: AtomicU64::new(1),
            version: AtomicU64::new(0),
        })
    }

    /// Insert a new document with a generated id.
    pub fn add(&self, collection: &str, data: Value) -> Result<Document, EcoConnectError> {
        check_collection(collection)?;
        let data = into_object(data)?;
        let id = generate_id();
        let created_at = Utc::now().to_rfc3339();
        let json = serde_json::to_string(&data)?;

        let seq = {
            let conn = self.conn.lock().map_err(lock_poisoned)?;
            conn.execute(
                "INSERT INTO documents (collection, id, data_json, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![collection, id, json, created_at],
            )?;
            conn.last_insert_rowid()
        };

        debug!("Added document {}/{}", collection, id);
        self.notify_after_write(collection);

        Ok(Document {
            id,
            collection: collection.to_string(),
            data,
            created_at,
            seq,
        })
    }

    /// Create or replace the document with the given id. Replacing keeps the
    /// original creation time and position in the collection.
    pub fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), EcoConnectError> {
        check_collection(collection)?;
        let json = serde_json::to_string(&into_object(data)?)?;

        {
            let conn = self.conn.lock().map_err(lock_poisoned)?;
            conn.execute(
                "INSERT INTO documents (collection, id, data_json, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(collection, id) DO UPDATE SET data_json = excluded.data_json",
                params![collection, id, json, Utc::now().to_rfc3339()],
            )?;
        }

        debug!("Set document {}/{}", collection, id);
        self.notify_after_write(collection);
        Ok(())
    }

    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, EcoConnectError> {
        let row = {
            let conn = self.conn.lock().map_err(lock_poisoned)?;
            conn.query_row(
                "SELECT seq, collection, id, data_json, created_at
                 FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                document_from_row,
            )
            .optional()?
        };
        row.map(with_body).transpose()
    }

    /// Apply field updates to an existing document.
    pub fn update(
        &self,
        collection: &str,
        id: &str,
        updates: &[(&str, FieldUpdate)],
    ) -> Result<Document, EcoConnectError> {
        let updated = {
            let conn = self.conn.lock().map_err(lock_poisoned)?;
            let row = conn
                .query_row(
                    "SELECT seq, collection, id, data_json, created_at
                     FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    document_from_row,
                )
                .optional()?
                .ok_or_else(|| EcoConnectError::NotFound(format!("{}/{}", collection, id)))?;

            let mut doc = with_body(row)?;
            for (field, update) in updates {
                update.apply(&mut doc.data, field);
            }

            conn.execute(
                "UPDATE documents SET data_json = ?1 WHERE collection = ?2 AND id = ?3",
                params![serde_json::to_string(&doc.data)?, collection, id],
            )?;
            doc
        };

        debug!("Updated document {}/{} ({} fields)", collection, id, updates.len());
        self.notify_after_write(collection);
        Ok(updated)
    }

    /// Read a collection in insertion order.
    pub fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, EcoConnectError> {
        let direction = match query.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        // SQLite treats a negative LIMIT as unbounded
        let limit = query.limit.map(|l| l as i64).unwrap_or(-1);

        let rows = {
            let conn = self.conn.lock().map_err(lock_poisoned)?;
            let mut stmt = conn.prepare(&format!(
                "SELECT seq, collection, id, data_json, created_at
                 FROM documents WHERE collection = ?1
                 ORDER BY seq {} LIMIT ?2",
                direction
            ))?;
            let rows = stmt
                .query_map(params![collection, limit], document_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter().map(with_body).collect()
    }

    fn snapshot(&self, collection: &str, query: &Query) -> Result<Snapshot, EcoConnectError> {
        Ok(Snapshot {
            collection: collection.to_string(),
            documents: self.query(collection, query)?,
            version: self.version.load(Ordering::SeqCst),
        })
    }

    /// Watch a collection. The current snapshot is queued immediately; later
    /// snapshots follow each write to the collection.
    pub fn subscribe(&self, collection: &str, query: Query) -> Result<Subscription, EcoConnectError> {
        check_collection(collection)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = SubscriptionHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));

        let mut subscribers = self.subscribers.lock().map_err(lock_poisoned)?;
        let initial = self.snapshot(collection, &query)?;
        // The receiver is alive, so the initial send cannot fail.
        let _ = tx.send(initial);
        subscribers.push(Subscriber {
            handle,
            collection: collection.to_string(),
            query,
            tx,
        });

        info!("Subscription {} opened on '{}'", handle.0, collection);
        Ok(Subscription::new(handle, rx))
    }

    /// Stop delivering snapshots to a subscription. Returns false if the
    /// handle was unknown or already closed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.handle != handle);
        let removed = subscribers.len() != before;
        if removed {
            info!("Subscription {} closed", handle.0);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Fan out a committed write. Delivery failures are logged; the write
    /// itself already succeeded.
    fn notify_after_write(&self, collection: &str) {
        if let Err(e) = self.notify(collection) {
            warn!("Failed to notify subscribers of '{}': {}", collection, e);
        }
    }

    /// Push a fresh snapshot to every live subscriber of `collection`.
    /// Subscribers whose receiver was dropped are pruned.
    fn notify(&self, collection: &str) -> Result<(), EcoConnectError> {
        self.version.fetch_add(1, Ordering::SeqCst);

        let mut subscribers = self.subscribers.lock().map_err(lock_poisoned)?;
        let mut closed = Vec::new();
        for sub in subscribers.iter().filter(|s| s.collection == collection) {
            let snapshot = self.snapshot(collection, &sub.query)?;
            if sub.tx.send(snapshot).is_err() {
                closed.push(sub.handle);
            }
        }
        if !closed.is_empty() {
            subscribers.retain(|s| !closed.contains(&s.handle));
            debug!("Pruned {} dropped subscriptions on '{}'", closed.len(), collection);
        }
        Ok(())
    }
}
