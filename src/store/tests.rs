//! Tests for the pet store module.

use super::*;
use crate::model::NewPet;
use crate::testing::PostgrestStub;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn new_pet(name: &str, kind: &str) -> NewPet {
    NewPet {
        name: name.to_string(),
        kind: kind.to_string(),
        years: "2 Years".to_string(),
        gender: "female".to_string(),
        img: String::new(),
        description: String::new(),
    }
}

/// One store of every local kind, each in its own temp directory.
fn local_stores(tmp: &TempDir) -> Vec<PetStore> {
    vec![
        PetStore::file(tmp.path().join("db.json")),
        PetStore::sqlite(tmp.path().join("data.sqlite")).unwrap(),
        PetStore::memory(),
    ]
}

// =============================================================================
// Contract tests (file, sqlite, memory)
// =============================================================================

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        assert!(store.list().await.unwrap().is_empty(), "{}", store.backend_name());
        assert_eq!(store.get(1).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_insert_then_get_returns_same_record() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        let created = store.insert(new_pet("Buddy", "dog")).await.unwrap();
        assert_eq!(created.name, "Buddy");
        assert_eq!(created.kind, "dog");
        assert!(created.created_at.is_some());

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created), "{}", store.backend_name());
    }
}

#[tokio::test]
async fn test_ids_are_sequential_and_list_is_ordered() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        let first = store.insert(new_pet("A", "dog")).await.unwrap();
        let second = store.insert(new_pet("B", "cat")).await.unwrap();
        let third = store.insert(new_pet("C", "bird")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(third.id, second.id + 1);

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["A", "B", "C"], "{}", store.backend_name());
    }
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        store.insert(new_pet("A", "dog")).await.unwrap();
        let last = store.insert(new_pet("B", "dog")).await.unwrap();
        assert!(store.delete(last.id).await.unwrap());

        let next = store.insert(new_pet("C", "dog")).await.unwrap();
        assert!(next.id > last.id, "{} reused id {}", store.backend_name(), last.id);
    }
}

#[tokio::test]
async fn test_delete_missing_reports_false() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        let pet = store.insert(new_pet("A", "dog")).await.unwrap();
        assert!(!store.delete(pet.id + 100).await.unwrap());
        assert!(store.delete(pet.id).await.unwrap());
        assert!(!store.delete(pet.id).await.unwrap());
        assert_eq!(store.get(pet.id).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_concurrent_inserts_get_unique_ids() {
    let tmp = TempDir::new().unwrap();
    for store in local_stores(&tmp) {
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..20 {
            let store = store.clone();
            tasks.spawn(async move { store.insert(new_pet(&format!("pet-{i}"), "cat")).await });
        }

        let mut ids = Vec::new();
        while let Some(result) = tasks.join_next().await {
            ids.push(result.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20, "{}", store.backend_name());
        assert_eq!(store.list().await.unwrap().len(), 20);
    }
}

// =============================================================================
// File backend specifics
// =============================================================================

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("db.json");

    let pet = PetStore::file(&path).insert(new_pet("Luna", "cat")).await.unwrap();

    let reopened = PetStore::file(&path);
    assert_eq!(reopened.get(pet.id).await.unwrap(), Some(pet));
}

#[tokio::test]
async fn test_file_store_reads_legacy_document() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("db.json");
    std::fs::write(
        &path,
        r#"{"pets": [{"id": 2, "name": "Rex", "type": "dog", "years": "3 Years", "gender": "male", "img": "", "description": null}]}"#,
    )
    .unwrap();

    let store = PetStore::file(&path);
    let rex = store.get(2).await.unwrap().unwrap();
    assert_eq!(rex.description, "");
    assert!(rex.created_at.is_none());

    let next = store.insert(new_pet("Max", "dog")).await.unwrap();
    assert_eq!(next.id, 3);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["next_id"], 4);
}

#[tokio::test]
async fn test_file_store_rejects_malformed_document() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("db.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = PetStore::file(&path).list().await.unwrap_err();
    assert!(matches!(err, StoreError::Document { .. }));
}

#[tokio::test]
async fn test_dropped_insert_does_not_clobber_next_write() {
    let tmp = TempDir::new().unwrap();
    let store = PetStore::file(tmp.path().join("db.json"));

    for round in 0..50 {
        let mut abandoned = Box::pin(store.insert(new_pet("Abandoned", "dog")));
        tokio::select! {
            biased;
            _ = &mut abandoned => {},
            () = std::future::ready(()) => {},
        }
        drop(abandoned);

        let kept = store.insert(new_pet(&format!("kept-{round}"), "cat")).await.unwrap();
        assert_eq!(
            store.get(kept.id).await.unwrap(),
            Some(kept.clone()),
            "round {round} lost pet {}",
            kept.id
        );
    }

    let pets = store.list().await.unwrap();
    let mut ids: Vec<_> = pets.iter().map(|p| p.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), pets.len());
    assert_eq!(pets.iter().filter(|p| p.name.starts_with("kept-")).count(), 50);
}

// =============================================================================
// Remote backend and fallback
// =============================================================================

fn remote_row(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "type": "dog",
        "years": "4 Years",
        "gender": "male",
        "img": null,
        "description": "from the remote table",
        "created_at": "2024-05-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_remote_backend_reads_and_writes_table() {
    let stub = PostgrestStub::start().await;
    stub.seed("pets", vec![remote_row(1, "Bolt")]);
    let backend = RemoteTableBackend::from_config(&stub.config()).unwrap();

    let pets = backend.list().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Bolt");
    assert_eq!(pets[0].img, "");

    let created = backend.insert(new_pet("Nala", "cat")).await.unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.kind, "cat");
    assert_eq!(backend.get(2).await.unwrap(), Some(created));
    assert_eq!(backend.get(9).await.unwrap(), None);

    assert!(backend.delete(1).await.unwrap());
    assert!(!backend.delete(1).await.unwrap());
    assert_eq!(stub.rows("pets").len(), 1);

    assert!(stub.api_keys().iter().all(|k| k == "stub-key"));
}

#[tokio::test]
async fn test_remote_backend_surfaces_status_errors() {
    let stub = PostgrestStub::start().await;
    stub.set_failing(true);
    let backend = RemoteTableBackend::from_config(&stub.config()).unwrap();

    let err = backend.list().await.unwrap_err();
    assert!(matches!(err, StoreError::RemoteStatus { status: 503, .. }));
}

async fn remote_with_local(stub: &PostgrestStub) -> (PetStore, PetStore) {
    let local = PetStore::memory();
    local.insert(new_pet("Local", "rabbit")).await.unwrap();
    let store = PetStore::remote(&stub.config(), local.clone()).unwrap();
    (store, local)
}

#[tokio::test]
async fn test_fallback_serves_local_when_remote_fails() {
    let stub = PostgrestStub::start().await;
    stub.set_failing(true);
    let (store, _) = remote_with_local(&stub).await;

    let pets = store.list().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Local");
    assert_eq!(store.backend_name(), "remote");
}

#[tokio::test]
async fn test_fallback_serves_local_when_remote_is_empty() {
    let stub = PostgrestStub::start().await;
    let (store, _) = remote_with_local(&stub).await;

    let pets = store.list().await.unwrap();
    assert_eq!(pets[0].name, "Local");
}

#[tokio::test]
async fn test_fallback_prefers_remote_rows() {
    let stub = PostgrestStub::start().await;
    stub.seed("pets", vec![remote_row(7, "Bolt")]);
    let (store, _) = remote_with_local(&stub).await;

    let pets = store.list().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Bolt");
}

#[tokio::test]
async fn test_fallback_get_checks_local_for_missing_remote_row() {
    let stub = PostgrestStub::start().await;
    stub.seed("pets", vec![remote_row(7, "Bolt")]);
    let (store, local) = remote_with_local(&stub).await;
    let local_id = local.list().await.unwrap()[0].id;

    assert_eq!(store.get(7).await.unwrap().unwrap().name, "Bolt");
    assert_eq!(store.get(local_id).await.unwrap().unwrap().name, "Local");
    assert_eq!(store.get(99).await.unwrap(), None);
}

#[tokio::test]
async fn test_fallback_get_surfaces_remote_errors() {
    let stub = PostgrestStub::start().await;
    stub.set_failing(true);
    let (store, _) = remote_with_local(&stub).await;

    assert!(store.get(1).await.is_err());
}

#[tokio::test]
async fn test_fallback_writes_go_to_remote_only() {
    let stub = PostgrestStub::start().await;
    let (store, local) = remote_with_local(&stub).await;

    let created = store.insert(new_pet("Remote", "dog")).await.unwrap();
    assert_eq!(stub.rows("pets").len(), 1);
    assert_eq!(local.list().await.unwrap().len(), 1);

    assert!(store.delete(created.id).await.unwrap());
    assert!(stub.rows("pets").is_empty());
}

#[tokio::test]
async fn test_fallback_write_errors_are_not_masked() {
    let stub = PostgrestStub::start().await;
    stub.set_failing(true);
    let (store, local) = remote_with_local(&stub).await;

    assert!(store.insert(new_pet("Remote", "dog")).await.is_err());
    assert_eq!(local.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_custom_backend_is_shared_between_clones() {
    let backend: Arc<dyn PetBackend> = Arc::new(MemoryBackend::new());
    let a = PetStore::from_arc(Arc::clone(&backend));
    let b = a.clone();

    let pet = a.insert(new_pet("Shared", "dog")).await.unwrap();
    assert_eq!(b.get(pet.id).await.unwrap(), Some(pet.clone()));
    assert_eq!(backend.get(pet.id).await.unwrap(), Some(pet));
}
