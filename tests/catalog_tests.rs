//! Catalog client tests against a live server.

#[path = "common.rs"]
mod common;

use common::{ADMIN_KEY, TestHost};
use pawshaven::catalog::{AgeBucket, ApiClient, CatalogFilter, Favorites};
use serde_json::json;
use tempfile::TempDir;

async fn seeded_host() -> TestHost {
    let host = TestHost::builder().with_admin_key(ADMIN_KEY).start().await.unwrap();
    for body in [
        json!({"name": "Buddy", "type": "dog", "years": "2 Years", "gender": "male"}),
        json!({"name": "Luna", "type": "cat", "years": "5 Years", "gender": "female"}),
        json!({"name": "Duke", "type": "dog", "years": "10 Years", "gender": "male"}),
    ] {
        let resp = host.post_json("/api/pets", &body, Some(ADMIN_KEY)).await.unwrap();
        assert_eq!(resp.status(), 201);
    }
    host
}

#[tokio::test]
async fn test_client_lists_and_filters() {
    let host = seeded_host().await;
    let client = ApiClient::new(host.base_url()).unwrap();

    let pets = client.list_pets().await.unwrap();
    assert_eq!(pets.len(), 3);

    let filter = CatalogFilter {
        kind: Some("Dog".to_string()),
        age: Some(AgeBucket::Senior),
        ..CatalogFilter::default()
    };
    let names: Vec<&str> = filter.apply(&pets).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Duke"]);
}

#[tokio::test]
async fn test_client_get_pet() {
    let host = seeded_host().await;
    let client = ApiClient::new(host.base_url()).unwrap();

    assert_eq!(client.get_pet(2).await.unwrap().unwrap().name, "Luna");
    assert!(client.get_pet(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    assert!(client.list_pets().await.is_err());
}

#[tokio::test]
async fn test_legacy_favorites_resolve_against_server() {
    let host = seeded_host().await;
    let client = ApiClient::new(host.base_url()).unwrap();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("favorites.json");

    std::fs::write(&path, r#"{"favorites": ["Luna"]}"#).unwrap();
    let mut favorites = Favorites::load(&path).unwrap();
    let pets = client.list_pets().await.unwrap();
    favorites.resolve_legacy(&pets);
    favorites.toggle(3);
    favorites.save(&path).unwrap();

    let reloaded = Favorites::load(&path).unwrap();
    let names: Vec<&str> = reloaded.resolve(&pets).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Luna", "Duke"]);
}

#[tokio::test]
async fn test_legacy_favorites_survive_empty_server() {
    let host = TestHost::builder().start().await.unwrap();
    let client = ApiClient::new(host.base_url()).unwrap();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("favorites.json");

    std::fs::write(&path, r#"{"favorites": ["Luna", 2]}"#).unwrap();
    let mut favorites = Favorites::load(&path).unwrap();
    let pets = client.list_pets().await.unwrap();
    assert!(pets.is_empty());
    assert_eq!(favorites.resolve_legacy(&pets), 0);
    favorites.save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["favorites"], json!([2, "Luna"]));
    assert!(Favorites::load(&path).unwrap().has_legacy_names());
}
