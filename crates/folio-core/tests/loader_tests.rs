//! Data loader integration tests over the fixture directory

mod common;

use std::sync::Arc;

use common::fixtures::{fixture_dir, fixture_loader, load_fixture, FlakySource};
use folio_core::{DataLoader, DirectorySource, DocumentCatalog, FolioConfig, LoadErrorKind};
use folio_domain::{Project, Publication, PublicationType, TimelineEntry};
use futures::future::join_all;

#[tokio::test]
async fn test_typed_records_from_fixtures() {
    let loader = fixture_loader();

    let publications: Vec<Publication> = loader.load_records("publications").await.unwrap();
    assert_eq!(publications.len(), 4);
    assert_eq!(publications[0].kind, PublicationType::Conference);
    assert!(publications[0].authors[0].is_me);
    assert!(!publications[0].authors[1].is_me);

    let education: Vec<TimelineEntry> = loader.load_records("education").await.unwrap();
    assert_eq!(education[0].position, "PhD in Computer Science");
    assert_eq!(education[0].organization, "University of Somewhere");

    let projects: Vec<Project> = loader.load_records("projects").await.unwrap();
    assert_eq!(projects[0].links.entries().len(), 2);
    assert!(projects[1].links.is_empty());
}

#[tokio::test]
async fn test_many_concurrent_callers_share_one_read() {
    let loader = fixture_loader();

    let results = join_all((0..8).map(|_| loader.load("publications"))).await;

    let first = results[0].as_ref().unwrap();
    for result in &results {
        assert!(Arc::ptr_eq(first, result.as_ref().unwrap()));
    }
    assert_eq!(loader.fetch_count(), 1);

    let raw: serde_json::Value = serde_json::from_str(&load_fixture("publications.json")).unwrap();
    assert_eq!(**first, raw);
}

#[tokio::test]
async fn test_failure_is_retried_on_next_call_only() {
    let source = Arc::new(FlakySource::failing(&["volunteering.json"]));
    let loader = DataLoader::new(source.clone(), DocumentCatalog::default());

    let err = loader.load("volunteering").await.unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Status(503));
    assert_eq!(source.reads(), 1);

    let _ = loader.load("volunteering").await;
    assert_eq!(source.reads(), 2);
    assert!(loader.cached_documents().is_empty());
}

#[tokio::test]
async fn test_catalog_override_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("pubs")).unwrap();
    std::fs::copy(
        fixture_dir().join("publications.json"),
        dir.path().join("pubs/all.json"),
    )
    .unwrap();

    let config = FolioConfig::from_toml(&format!(
        r#"
[data]
source = "directory"
root = "{}"

[data.documents]
publications = "pubs/all.json"
"#,
        dir.path().display()
    ))
    .unwrap();

    let loader = DataLoader::new(config.data.build_source().unwrap(), config.data.catalog());
    let records: Vec<Publication> = loader.load_records("publications").await.unwrap();
    assert_eq!(records.len(), 4);

    // Documents not overridden keep their default path and are absent here
    let err = loader.load("education").await.unwrap_err();
    assert!(matches!(err.kind, LoadErrorKind::Fetch(_)));
}

#[tokio::test]
async fn test_non_array_document_is_decode_error() {
    let loader = DataLoader::new(
        Arc::new(DirectorySource::new(fixture_dir())),
        DocumentCatalog::default(),
    );
    let err = loader.load_records::<Publication>("bio").await.unwrap_err();
    assert_eq!(err.document, "bio");
    assert!(matches!(err.kind, LoadErrorKind::Decode(_)));
}
