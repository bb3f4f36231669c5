//! In-process document store
//!
//! Used when no remote store is configured and as a substitutable store in
//! tests. A failure can be injected so callers can exercise their degraded
//! paths without a network.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use super::{Direction, DocumentStore, Fields, StoreError, StoredDocument};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
    failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `error`
    pub fn failing(error: StoreError) -> Self {
        let store = Self::default();
        store.fail_with(Some(error));
        store
    }

    /// Make subsequent calls fail (`Some`) or succeed again (`None`)
    pub fn fail_with(&self, error: Option<StoreError>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }

    /// Seed a document with a known id
    pub fn put(&self, collection: &str, id: &str, fields: Fields) {
        self.collections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.to_string(),
                fields,
            });
    }

    /// All documents in a collection, in insertion order
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Order two optional field values; missing values sort after present ones
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query_ordered(
        &self,
        collection: &str,
        order_by: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_failure()?;

        let mut documents = self.documents(collection);
        documents.sort_by(|a, b| {
            let ordering = compare_field(a.fields.get(order_by), b.fields.get(order_by));
            match direction {
                Direction::Ascending => ordering,
                // Missing values stay last in both directions
                Direction::Descending => match (a.fields.get(order_by), b.fields.get(order_by)) {
                    (Some(_), Some(_)) => ordering.reverse(),
                    _ => ordering,
                },
            }
        });

        debug!(
            "Memory store query on '{}' returned {} documents",
            collection,
            documents.len()
        );
        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.check_failure()?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        self.put(collection, &id, fields);
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
