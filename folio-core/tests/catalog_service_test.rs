//! Catalog service behaviour over an in-memory store

mod common;

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{fields, ids, init_test_logging, memory_store, seed_upload, static_project};
use folio_core::catalog::{CatalogService, SubmitError, CREATED_AT_FIELD};
use folio_core::project::ProjectDetails;
use folio_core::store::{DocumentStore, StoreError};

fn service_over(store: std::sync::Arc<folio_core::store::MemoryStore>) -> CatalogService {
    CatalogService::new(store)
        .with_static_entries(vec![static_project("S1", "A"), static_project("S2", "B")])
}

#[tokio::test]
async fn test_uploaded_first_newest_first_then_static() {
    init_test_logging();
    let store = memory_store();
    let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let t2 = t1 + Duration::days(3);
    seed_upload(&store, "R2", "A", t1);
    seed_upload(&store, "R1", "B", t2);

    let listing = service_over(store).list_all().await;

    assert!(!listing.is_degraded());
    assert_eq!(listing.remote_count, 2);
    assert_eq!(ids(&listing.projects), vec!["R1", "R2", "S1", "S2"]);
    assert!(listing.projects[0].is_dynamic());
}

#[tokio::test]
async fn test_read_failure_degrades_to_static() {
    init_test_logging();
    let store = memory_store();
    seed_upload(&store, "R1", "A", Utc::now());
    store.fail_with(Some(StoreError::Transport("connection refused".to_string())));

    let service = service_over(store);
    let listing = service.list_all().await;

    assert!(listing.is_degraded());
    assert_eq!(
        listing.failure,
        Some(StoreError::Transport("connection refused".to_string()))
    );
    assert_eq!(listing.projects, service.static_entries().to_vec());
}

#[tokio::test]
async fn test_degraded_read_is_repeatable() {
    let store = memory_store();
    store.fail_with(Some(StoreError::PermissionDenied("rules".to_string())));
    let service = service_over(store);

    let first = service.list_all().await;
    let second = service.list_all().await;

    assert_eq!(first.projects, second.projects);
    assert_eq!(ids(&first.projects), vec!["S1", "S2"]);
}

#[tokio::test]
async fn test_default_static_entries_always_present() {
    let store = memory_store();
    store.fail_with(Some(StoreError::Transport("offline".to_string())));

    let listing = CatalogService::new(store).list_all().await;
    assert_eq!(listing.projects.len(), folio_core::catalog::static_projects().len());
}

#[tokio::test]
async fn test_undecodable_upload_is_skipped() {
    init_test_logging();
    let store = memory_store();
    seed_upload(&store, "good", "A", Utc::now());
    store.put("projects", "bad", fields(json!({"title": 42})));

    let listing = service_over(store).list_all().await;

    assert_eq!(listing.skipped, 1);
    assert_eq!(ids(&listing.projects), vec!["good", "S1", "S2"]);
}

#[tokio::test]
async fn test_unexpected_orientation_keeps_upload() {
    init_test_logging();
    let store = memory_store();
    let t1 = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    for (id, orientation, created_at) in [
        ("cased", "Landscape", t1 + Duration::days(1)),
        ("odd", "diagonal", t1),
    ] {
        store.put(
            "projects",
            id,
            fields(json!({
                "title": format!("Upload {id}"),
                "category": "A",
                "imageUrl": format!("https://cdn.example.com/{id}.png"),
                "orientation": orientation,
                "createdAt": folio_core::project::format_timestamp(created_at),
            })),
        );
    }

    let listing = service_over(store).list_all().await;

    assert_eq!(listing.skipped, 0);
    assert_eq!(ids(&listing.projects), vec!["cased", "odd", "S1", "S2"]);
    assert_eq!(
        listing.projects[0].orientation,
        Some(folio_core::project::Orientation::Landscape)
    );
    assert_eq!(listing.projects[1].orientation, None);
}

#[tokio::test]
async fn test_stored_drive_links_are_normalized_on_read() {
    let store = memory_store();
    store.put(
        "projects",
        "legacy",
        fields(json!({
            "title": "Legacy",
            "category": "A",
            "imageUrl": "https://drive.google.com/file/d/LEGACY/view",
            "createdAt": "2024-05-01T00:00:00.000Z"
        })),
    );

    let listing = service_over(store).list_all().await;
    assert_eq!(
        listing.projects[0].image_url,
        "https://drive.google.com/thumbnail?id=LEGACY&sz=w1920"
    );
}

#[tokio::test]
async fn test_submit_sanitizes_fields() {
    let store = memory_store();
    let service = service_over(store.clone());
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let details = ProjectDetails {
        title: "T".to_string(),
        category: "C".to_string(),
        description: Some(String::new()),
        tools: None,
        tags: Some(vec!["a".to_string(), String::new()]),
        ..Default::default()
    };

    let id = service
        .submit_at("https://drive.google.com/file/d/IMG/view?usp=sharing", &details, at)
        .await
        .unwrap();

    let stored = store.documents("projects");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(
        Value::Object(stored[0].fields.clone()),
        json!({
            "title": "T",
            "category": "C",
            "tags": ["a", ""],
            "imageUrl": "https://drive.google.com/thumbnail?id=IMG&sz=w1920",
            "createdAt": "2025-06-01T12:00:00.000Z"
        })
    );
    assert!(!stored[0].fields.contains_key("description"));
    assert!(!stored[0].fields.contains_key("tools"));
}

#[tokio::test]
async fn test_submitted_project_lists_first() {
    let store = memory_store();
    let service = service_over(store.clone());
    seed_upload(&store, "older", "A", Utc::now() - Duration::days(30));

    let id = service
        .submit("https://cdn.example.com/new.png", &ProjectDetails::new("New", "B"))
        .await
        .unwrap();

    let listing = service.list_all().await;
    assert_eq!(listing.projects[0].id, id);
    assert!(listing.projects[0].created_at.is_some());
    assert_eq!(ids(&listing.projects)[1..], ["older", "S1", "S2"]);
}

#[tokio::test]
async fn test_submit_without_link_touches_nothing() {
    let store = memory_store();
    let service = service_over(store.clone());

    let err = service
        .submit("   ", &ProjectDetails::new("T", "C"))
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::MissingImageLink);
    assert_eq!(err.user_message(), "Please provide an image link.");
    assert!(store.documents("projects").is_empty());
}

#[tokio::test]
async fn test_submit_errors_are_classified() {
    let store = memory_store();
    let service = service_over(store.clone());
    let details = ProjectDetails::new("T", "C");

    store.fail_with(Some(StoreError::PermissionDenied("denied".to_string())));
    let err = service.submit("https://x/y.png", &details).await.unwrap_err();
    assert!(matches!(err, SubmitError::AccessDenied(_)));
    assert!(err.user_message().starts_with("Permission denied"));

    store.fail_with(Some(StoreError::NotProvisioned("no database".to_string())));
    let err = service.submit("https://x/y.png", &details).await.unwrap_err();
    assert!(matches!(err, SubmitError::NotProvisioned(_)));
    assert!(err.user_message().contains("has not been created"));

    store.fail_with(Some(StoreError::Backend {
        status: 500,
        message: String::new(),
    }));
    let err = service.submit("https://x/y.png", &details).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to upload project.");
}

#[tokio::test]
async fn test_custom_collection() {
    let store = memory_store();
    let service = service_over(store.clone()).with_collection("drafts");

    service
        .submit("https://x/y.png", &ProjectDetails::new("T", "C"))
        .await
        .unwrap();

    assert!(store.documents("projects").is_empty());
    let drafts = store
        .query_ordered("drafts", CREATED_AT_FIELD, folio_core::store::Direction::Descending)
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
}
