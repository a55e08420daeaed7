//! Integration tests for JSON snapshot persistence.

use padel_challenge_web::store::{SnapshotStore, StoreError};
use padel_challenge_web::Club;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("padel-{}-{}.json", name, uuid::Uuid::new_v4()))
}

#[test]
fn memory_only_store_starts_empty() {
    let store = SnapshotStore::new(None);
    assert_eq!(store.load().unwrap(), Club::new());
}

#[test]
fn missing_file_starts_empty() {
    let store = SnapshotStore::new(Some(temp_path("missing")));
    assert_eq!(store.load().unwrap(), Club::new());
}

#[test]
fn corrupt_file_is_a_format_error() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "{ not json").unwrap();
    let err = SnapshotStore::new(Some(path.clone())).load().unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn saved_club_loads_back() {
    let path = temp_path("saved");
    let store = SnapshotStore::new(Some(path.clone()));
    let mut club = Club::new();
    club.register_player("Anna", None).unwrap();

    store.write(SnapshotStore::encode(&club).unwrap()).await.unwrap();
    assert_eq!(store.load().unwrap(), club);
    std::fs::remove_file(path).unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_leave_the_latest_club() {
    let path = temp_path("concurrent");
    let store = Arc::new(SnapshotStore::new(Some(path.clone())));
    let club = Arc::new(Mutex::new(Club::new()));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let (store, club) = (Arc::clone(&store), Arc::clone(&club));
            tokio::spawn(async move {
                club.lock().unwrap().register_player(&format!("P{i}"), None).unwrap();
                store
                    .save(|| SnapshotStore::encode(&club.lock().unwrap()))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let loaded = store.load().unwrap();
    assert_eq!(loaded.players.len(), 32);
    assert_eq!(loaded, *club.lock().unwrap());
    assert!(!path.with_extension("json.tmp").exists());
    std::fs::remove_file(path).unwrap();
}
