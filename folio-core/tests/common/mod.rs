//! Shared helpers for folio-core integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Once};

use folio_core::project::{format_timestamp, Project};
use folio_core::store::{Fields, MemoryStore};

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A curated project fixture
pub fn static_project(id: &str, category: &str) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Static {id}"),
        category: category.to_string(),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        description: None,
        client: None,
        year: Some("2025".to_string()),
        tools: vec![],
        tags: vec![],
        orientation: None,
        created_at: None,
    }
}

/// Seed an uploaded project document
pub fn seed_upload(store: &MemoryStore, id: &str, category: &str, created_at: DateTime<Utc>) {
    store.put(
        "projects",
        id,
        fields(json!({
            "title": format!("Upload {id}"),
            "category": category,
            "imageUrl": format!("https://cdn.example.com/{id}.png"),
            "createdAt": format_timestamp(created_at),
        })),
    );
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn ids(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.id.as_str()).collect()
}
