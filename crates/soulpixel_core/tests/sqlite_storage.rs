use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rusqlite::Connection;
use soulpixel_core::db::{open_db, open_db_in_memory, DbError};
use soulpixel_core::{
    Mood, SqliteThoughtStorage, StorageError, StoreConfig, ThoughtStorage, ThoughtStore,
    DEFAULT_STORAGE_KEY,
};

#[test]
fn empty_slot_loads_as_empty_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();

    assert!(storage.load().unwrap().is_empty());
    assert_eq!(storage.read_raw().unwrap(), None);
}

#[test]
fn store_mutations_replace_slot_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();
    let mut store = ThoughtStore::load_with_rng(
        storage,
        StoreConfig::default(),
        ChaCha20Rng::seed_from_u64(5),
    )
    .unwrap();

    store.submit("first", Some(Mood::Angry)).unwrap();
    store.submit("second", None).unwrap();
    store.delete(0).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    let raw = store.storage().read_raw().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["text"], "second");
}

#[test]
fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("soulpixel.db");

    let expected = {
        let conn = open_db(&path).unwrap();
        let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();
        let mut store = ThoughtStore::load(storage, StoreConfig::default()).unwrap();
        store.submit("durable", Some(Mood::Calm)).unwrap();
        store.add_comment(0, "still here").unwrap();
        store.thoughts().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();
    let store = ThoughtStore::load(storage, StoreConfig::default()).unwrap();
    assert_eq!(store.thoughts(), expected.as_slice());
}

#[test]
fn slots_are_isolated_by_key() {
    let conn = open_db_in_memory().unwrap();
    let mut first = SqliteThoughtStorage::try_new(&conn, "board-a").unwrap();
    let second = SqliteThoughtStorage::try_new(&conn, "board-b").unwrap();

    first.save(&[]).unwrap();
    assert_eq!(first.read_raw().unwrap().as_deref(), Some("[]"));
    assert_eq!(second.read_raw().unwrap(), None);
    assert_eq!(first.key(), "board-a");
}

#[test]
fn legacy_slot_written_by_older_builds_is_normalized() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();
    storage
        .write_raw(r#"["old thought", {"text": "object", "mood": "😊"}]"#)
        .unwrap();

    let store = ThoughtStore::load(storage, StoreConfig::default()).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.migration_pending());
    assert_eq!(store.thoughts()[1].mood, Some(Mood::Happy));
}

#[test]
fn corrupt_slot_is_parse_error() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY).unwrap();
    storage.write_raw("not json at all").unwrap();

    assert!(matches!(storage.load(), Err(StorageError::Parse(_))));
    let store = ThoughtStore::load_or_default(storage, StoreConfig::default());
    assert!(store.is_empty());
}

#[test]
fn unmigrated_connection_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteThoughtStorage::try_new(&conn, DEFAULT_STORAGE_KEY)
        .err()
        .expect("raw connection must be rejected");
    assert!(matches!(
        err,
        StorageError::Db(DbError::SchemaNotMigrated {
            db_version: 0,
            ..
        })
    ));
}
