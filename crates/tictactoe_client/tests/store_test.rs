//! Tests for the persistence backends.

use tictactoe_client::{
    AccountService, AnyStore, AppConfig, JsonFileStore, MemoryStore, PlayerRecord, PlayerStore,
    SqliteStore, StoreBackend,
};

fn sample() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord::with_stats("zoe".into(), "hash-z".into(), 2, 3),
        PlayerRecord::with_stats("adam".into(), "hash-a".into(), 0, 1),
    ]
}

/// Saves, reloads, then overwrites with a shorter collection.
fn exercise_full_overwrite(store: &impl PlayerStore) {
    assert!(store.load().unwrap().is_empty());

    store.save(&sample()).unwrap();
    assert_eq!(store.load().unwrap(), sample());

    let shorter = vec![PlayerRecord::with_stats("adam".into(), "hash-a".into(), 1, 2)];
    store.save(&shorter).unwrap();
    assert_eq!(store.load().unwrap(), shorter);
}

#[test]
fn test_memory_store_overwrites() {
    exercise_full_overwrite(&MemoryStore::new());
}

#[test]
fn test_memory_store_clones_share_records() {
    let store = MemoryStore::new();
    store.clone().save(&sample()).unwrap();
    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_json_store_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    exercise_full_overwrite(&JsonFileStore::new(dir.path().join("players.json")));
}

#[test]
fn test_json_store_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("players.json");
    JsonFileStore::new(&path).save(&sample()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_json_store_uses_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");
    JsonFileStore::new(&path).save(&sample()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value[0]["username"], "zoe");
    assert_eq!(value[0]["passwordHash"], "hash-z");
    assert_eq!(value[0]["totalGames"], 3);
}

#[test]
fn test_json_store_blank_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");
    std::fs::write(&path, "  \n").unwrap();
    assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
}

#[test]
fn test_json_store_save_replaces_file_via_staging() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");
    let staging = dir.path().join("players.json.tmp");
    let store = JsonFileStore::new(&path);
    store.save(&sample()).unwrap();

    // Leftover from an interrupted save.
    std::fs::write(&staging, "[{\"trunc").unwrap();
    assert_eq!(store.load().unwrap(), sample());

    let shorter = vec![PlayerRecord::with_stats("adam".into(), "hash-a".into(), 1, 2)];
    store.save(&shorter).unwrap();
    assert!(!staging.exists());
    assert_eq!(store.load().unwrap(), shorter);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_sqlite_store_overwrites_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.db");
    let store = SqliteStore::open(path.to_string_lossy().into_owned()).unwrap();
    exercise_full_overwrite(&store);
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.db").to_string_lossy().into_owned();

    SqliteStore::open(path.clone())
        .unwrap()
        .save(&sample())
        .unwrap();
    let reopened = SqliteStore::open(path).unwrap();
    assert_eq!(reopened.load().unwrap(), sample());
}

#[test]
fn test_any_store_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.set_store_backend(StoreBackend::Sqlite);
    config.set_store_path(dir.path().join("players.db"));

    let store = AnyStore::from_config(&config).unwrap();
    assert!(matches!(store, AnyStore::Sqlite(_)));

    AccountService::new(store.clone())
        .register("alice", "secret")
        .unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}
