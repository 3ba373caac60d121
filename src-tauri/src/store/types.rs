use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EcoConnectError;

/// A stored JSON object within a named collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub collection: String,
    pub data: Map<String, Value>,
    /// RFC 3339 timestamp assigned on first write.
    pub created_at: String,
    /// Store-wide insertion order.
    pub seq: i64,
}

impl Document {
    /// Decode the document body into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, EcoConnectError> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

/// Ordering and size of a collection read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl Query {
    pub fn oldest_first() -> Self {
        Self {
            order: SortOrder::Ascending,
            limit: None,
        }
    }

    pub fn newest_first() -> Self {
        Self {
            order: SortOrder::Descending,
            limit: None,
        }
    }

    pub fn with_limit(self, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}

/// A single-field mutation applied by `DocumentStore::update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    /// Replace the field.
    Set(Value),
    /// Append to the array field unless an equal element is already present.
    ArrayUnion(Value),
    /// Remove every element equal to the value from the array field.
    ArrayRemove(Value),
}

impl FieldUpdate {
    /// Apply to `field` of `data`. A missing or non-array field is treated as
    /// an empty array by the array operations.
    pub fn apply(&self, data: &mut Map<String, Value>, field: &str) {
        match self {
            FieldUpdate::Set(value) => {
                data.insert(field.to_string(), value.clone());
            }
            FieldUpdate::ArrayUnion(value) => {
                let items = array_field(data, field);
                if !items.contains(value) {
                    items.push(value.clone());
                }
            }
            FieldUpdate::ArrayRemove(value) => {
                let items = array_field(data, field);
                items.retain(|v| v != value);
            }
        }
    }
}

fn array_field<'a>(data: &'a mut Map<String, Value>, field: &str) -> &'a mut Vec<Value> {
    let slot = data
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just set to an array"),
    }
}

/// An ordered read of a collection delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub collection: String,
    pub documents: Vec<Document>,
    /// Store write counter at the time the snapshot was taken.
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_set_replaces_field() {
        let mut data = object(json!({"content": "old"}));
        FieldUpdate::Set(json!("new")).apply(&mut data, "content");
        assert_eq!(data["content"], "new");
    }

    #[test]
    fn test_array_union_does_not_duplicate() {
        let mut data = object(json!({"likes": ["a"]}));
        FieldUpdate::ArrayUnion(json!("b")).apply(&mut data, "likes");
        FieldUpdate::ArrayUnion(json!("a")).apply(&mut data, "likes");
        assert_eq!(data["likes"], json!(["a", "b"]));
    }

    #[test]
    fn test_array_union_creates_missing_field() {
        let mut data = object(json!({}));
        FieldUpdate::ArrayUnion(json!({"id": 1})).apply(&mut data, "comments");
        assert_eq!(data["comments"], json!([{"id": 1}]));
    }

    #[test]
    fn test_array_remove_removes_all_equal() {
        let mut data = object(json!({"likes": ["a", "b", "a"]}));
        FieldUpdate::ArrayRemove(json!("a")).apply(&mut data, "likes");
        assert_eq!(data["likes"], json!(["b"]));
    }

    #[test]
    fn test_array_ops_reset_non_array_field() {
        let mut data = object(json!({"likes": 3}));
        FieldUpdate::ArrayRemove(json!("a")).apply(&mut data, "likes");
        assert_eq!(data["likes"], json!([]));
    }

    #[test]
    fn test_document_decode() {
        #[derive(Deserialize)]
        struct Body {
            content: String,
        }
        let doc = Document {
            id: "abc".to_string(),
            collection: "posts".to_string(),
            data: object(json!({"content": "hello", "extra": true})),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            seq: 1,
        };
        let body: Body = doc.decode().unwrap();
        assert_eq!(body.content, "hello");
    }
}
