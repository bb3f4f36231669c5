//! Remote document store abstraction
//!
//! The catalog only needs two things from its backing store: an ordered
//! query over one collection and a single-record insert with a
//! store-assigned id. No updates, deletes or transactions.
//!
//! - [`FirestoreStore`] talks to Cloud Firestore over its REST API
//! - [`MemoryStore`] keeps documents in process (offline mode, tests)

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::StoreBackend;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "firestore")]
mod firestore;
#[cfg(feature = "firestore")]
mod values;

#[cfg(feature = "firestore")]
pub use firestore::{FirestoreStore, DEFAULT_FIRESTORE_URL};
#[cfg(feature = "firestore")]
pub use values::{decode_fields, encode_fields};

/// Document fields as schemaless JSON
pub type Fields = Map<String, Value>;

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A document read back from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned identifier
    pub id: String,
    pub fields: Fields,
}

/// Failures reported by a document store
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Security rules or credentials rejected the request
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The backing database has not been created
    #[error("Store not provisioned: {0}")]
    NotProvisioned(String),

    /// The store is not configured in this build or config
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    /// Network or client failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with an error we do not classify further
    #[error("Store error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    /// The response could not be decoded
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

/// Minimal contract the catalog needs from a document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection`, ordered by `order_by`
    async fn query_ordered(
        &self,
        collection: &str,
        order_by: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Insert a new document and return its assigned id
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Backend identifier for logging
    fn name(&self) -> &'static str;
}

/// Open the store selected by the site configuration
pub fn open_store(config: &crate::config::StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            debug!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "firestore")]
        StoreBackend::Firestore => Ok(Arc::new(FirestoreStore::from_config(config)?)),
        #[cfg(not(feature = "firestore"))]
        StoreBackend::Firestore => anyhow::bail!(
            "This build does not include the Firestore backend. Set store.backend to memory"
        ),
    }
}
