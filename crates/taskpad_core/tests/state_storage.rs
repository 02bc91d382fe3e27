use taskpad_core::db::migrations::latest_version;
use taskpad_core::db::{open_db, open_db_in_memory};
use taskpad_core::{MemoryStateStorage, SqliteStateStorage, StateStorage, StorageError};

#[test]
fn memory_adapter_returns_none_for_absent_keys() {
    let storage = MemoryStateStorage::new();
    assert_eq!(storage.get("tasks-data").unwrap(), None);
}

#[test]
fn memory_adapter_stores_and_overwrites_values() {
    let mut storage = MemoryStateStorage::new();

    storage.set("tasks-data", "[]").unwrap();
    assert_eq!(storage.get("tasks-data").unwrap().as_deref(), Some("[]"));

    storage.set("tasks-data", r#"[{"id":1}]"#).unwrap();
    assert_eq!(
        storage.get("tasks-data").unwrap().as_deref(),
        Some(r#"[{"id":1}]"#)
    );
}

#[test]
fn sqlite_adapter_stores_and_overwrites_values() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteStateStorage::try_new(conn).unwrap();

    assert_eq!(storage.get("tasks-data").unwrap(), None);

    storage.set("tasks-data", "first value").unwrap();
    assert_eq!(
        storage.get("tasks-data").unwrap().as_deref(),
        Some("first value")
    );

    storage.set("tasks-data", "second value").unwrap();
    assert_eq!(
        storage.get("tasks-data").unwrap().as_deref(),
        Some("second value")
    );
}

#[test]
fn sqlite_adapter_keeps_keys_independent() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteStateStorage::try_new(conn).unwrap();

    storage.set("tasks-data", "tasks").unwrap();
    storage.set("other-key", "other").unwrap();

    assert_eq!(storage.get("tasks-data").unwrap().as_deref(), Some("tasks"));
    assert_eq!(storage.get("other-key").unwrap().as_deref(), Some("other"));
}

#[test]
fn sqlite_adapter_rejects_unmigrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();

    let result = SqliteStateStorage::try_new(conn);
    match result {
        Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an uninitialized connection error"),
    }
}

#[test]
fn sqlite_adapter_rejects_connection_without_kv_table() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStateStorage::try_new(conn);
    assert!(matches!(
        result,
        Err(StorageError::MissingRequiredTable("kv_state"))
    ));
}

#[test]
fn sqlite_adapter_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    {
        let mut storage = SqliteStateStorage::try_new(open_db(&path).unwrap()).unwrap();
        storage.set("tasks-data", "durable value").unwrap();
    }

    let storage = SqliteStateStorage::try_new(open_db(&path).unwrap()).unwrap();
    assert_eq!(
        storage.get("tasks-data").unwrap().as_deref(),
        Some("durable value")
    );
}
