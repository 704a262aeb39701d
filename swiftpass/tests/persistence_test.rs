//! JSON-file store behavior: round-trips, absence, and malformed records.
//!
//! Run with: `cargo test --test persistence_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use swiftpass::providers::LocalStore;
use swiftpass::types::{TierCatalog, TierId, UserInfo};
use swiftpass::JsonFileStore;
use std::path::PathBuf;
use uuid::Uuid;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("swiftpass-test-{}", Uuid::new_v4())))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn attendee() -> UserInfo {
    UserInfo {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        special_request: "vegetarian".to_string(),
        profile_image: Some("https://example.com/me.png".to_string()),
    }
}

#[tokio::test]
async fn form_round_trips_across_store_instances() {
    let dir = TempDir::new();
    let store = JsonFileStore::new(&dir.0);

    assert_eq!(store.load_form().await.unwrap(), None);

    store.save_form(&attendee()).await.unwrap();

    // A fresh instance over the same directory sees the record, as a
    // reloaded session would.
    let reopened = JsonFileStore::new(&dir.0);
    assert_eq!(reopened.load_form().await.unwrap(), Some(attendee()));
}

#[tokio::test]
async fn clear_form_removes_the_record_and_is_idempotent() {
    let dir = TempDir::new();
    let store = JsonFileStore::new(&dir.0);

    store.save_form(&attendee()).await.unwrap();
    store.clear_form().await.unwrap();
    assert_eq!(store.load_form().await.unwrap(), None);

    // Clearing an absent record is not an error.
    store.clear_form().await.unwrap();
}

#[tokio::test]
async fn malformed_record_is_treated_as_absent() {
    let dir = TempDir::new();
    let store = JsonFileStore::new(&dir.0);

    store.save_form(&attendee()).await.unwrap();
    tokio::fs::write(dir.0.join("current_form.json"), b"{ not json")
        .await
        .unwrap();

    assert_eq!(store.load_form().await.unwrap(), None);
}

#[tokio::test]
async fn record_with_unexpected_shape_is_treated_as_absent() {
    let dir = TempDir::new();
    let store = JsonFileStore::new(&dir.0);

    // The store creates its directory lazily on first write; this test
    // writes the fixture directly, so create the directory first.
    tokio::fs::create_dir_all(&dir.0).await.unwrap();

    // Valid JSON, wrong schema.
    tokio::fs::write(
        dir.0.join("current_form.json"),
        br#"{"step": 2, "tickets": []}"#,
    )
    .await
    .unwrap();

    assert_eq!(store.load_form().await.unwrap(), None);
}

#[tokio::test]
async fn catalog_round_trips_with_availability() {
    let dir = TempDir::new();
    let store = JsonFileStore::new(&dir.0);

    assert_eq!(store.load_catalog().await.unwrap(), None);

    let mut catalog = TierCatalog::seed();
    catalog.decrement(&TierId::new("VVIP"), 4);
    store.save_catalog(&catalog).await.unwrap();

    let loaded = store.load_catalog().await.unwrap().expect("catalog cached");
    assert_eq!(
        loaded.get(&TierId::new("VVIP")).map(|t| t.available),
        Some(16)
    );
    assert!(loaded.is_consistent());
}
