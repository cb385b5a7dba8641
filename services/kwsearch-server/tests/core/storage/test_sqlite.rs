// SQLite store integration tests

use crate::common::{unavailable_services, IndexBuilder};
use kwsearch::core::error::KwSearchError;
use kwsearch::core::search::plan_query;
use kwsearch::core::storage::{KeywordStore, Snapshot, SqliteStore};
use std::collections::BTreeSet;
use std::time::Duration;
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> SqliteStore {
    SqliteStore::new(temp.path().join("index.db"), Duration::from_millis(200))
}

#[test]
fn test_import_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    std::fs::write(
        &path,
        serde_json::to_string(&IndexBuilder::cat_dog()).unwrap(),
    )
    .unwrap();

    let snapshot = Snapshot::from_file(&path).unwrap();
    let store = store_in(&temp);
    let stats = store.import_snapshot(&snapshot, false).unwrap();

    assert_eq!(stats.webpages, 4);
    assert_eq!(stats.keywords, 3);
    assert_eq!(stats.occurrences, 7);
}

#[test]
fn test_long_filter_chain() {
    // More terms than a single compound select allows
    let mut builder = IndexBuilder::new().page(1, "everything").page(2, "almost");
    let terms: Vec<String> = (0..600).map(|i| format!("t{i}")).collect();
    for term in &terms {
        builder = builder.link(term, 1, 0.5);
    }
    for term in &terms[..599] {
        builder = builder.link(term, 2, 0.5);
    }

    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.import_snapshot(&builder.build(), false).unwrap();

    let plan = plan_query(&terms).unwrap();
    assert_eq!(
        store.candidate_documents(&plan.filter).unwrap(),
        BTreeSet::from([1])
    );
}

#[test]
fn test_invalid_snapshot_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let mut snapshot = IndexBuilder::cat_dog();
    snapshot.occurrences[0].pagerank = f64::NAN;

    let err = store.import_snapshot(&snapshot, false).unwrap_err();
    assert!(matches!(err, KwSearchError::InvalidSnapshot(_)));
    assert!(!store.path().exists());
}

#[test]
fn test_missing_database_is_unavailable() {
    let (services, _temp) = unavailable_services();
    let err = services.search.search("cat").unwrap_err();
    assert!(err.is_unavailable());

    // Empty queries never open the database
    assert!(services.search.search("   ").is_ok());
}

#[tokio::test]
async fn test_missing_database_is_unavailable_async() {
    let (services, _temp) = unavailable_services();
    let err = services
        .search
        .search_async("cat".to_string(), None)
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}
