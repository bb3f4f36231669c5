//! Browsing a merged catalog: categories, filtering and "show more"

mod common;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use common::{memory_store, seed_upload, static_project};
use folio_core::catalog::{CatalogService, CatalogView, CategoryFilter, INITIAL_LIMIT};

#[tokio::test]
async fn test_filter_merged_catalog_by_category() {
    let store = memory_store();
    let now = Utc::now();
    seed_upload(&store, "R1", "A", now);
    seed_upload(&store, "R2", "B", now - Duration::hours(1));
    seed_upload(&store, "R3", "A", now - Duration::hours(2));

    let listing = CatalogService::new(store)
        .with_static_entries(vec![static_project("S1", "B"), static_project("S2", "A")])
        .list_all()
        .await;

    let mut view = CatalogView::new(listing.into_projects());
    assert_eq!(view.category_labels(), vec!["All", "A", "B"]);

    view.select_category("A");
    assert_eq!(view.filter(), &CategoryFilter::Only("A".to_string()));
    let shown: Vec<&str> = view.displayed().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(shown, vec!["R1", "R3", "S2"]);
    assert!(view.displayed().iter().all(|p| p.category == "A"));

    view.select_category("All");
    assert_eq!(view.displayed().len(), 5);
}

#[tokio::test]
async fn test_show_more_over_real_catalog() {
    let store = memory_store();
    let now = Utc::now();
    for i in 0..8 {
        seed_upload(&store, &format!("R{i}"), "A", now - Duration::minutes(i));
    }

    let listing = CatalogService::new(store).list_all().await;
    let total = listing.projects.len();
    assert!(total > INITIAL_LIMIT);

    let mut view = CatalogView::new(listing.into_projects());
    assert_eq!(view.displayed().len(), INITIAL_LIMIT);
    assert!(view.has_more());

    view.show_more();
    assert_eq!(view.displayed().len(), total);

    view.select_category("All");
    assert_eq!(view.displayed().len(), INITIAL_LIMIT);
}
