use rusqlite::Connection;
use tasklist_core::db::migrations::latest_version;
use tasklist_core::db::open_db;
use tasklist_core::{
    KeyValueStore, KeyValueTaskStore, MemoryView, SqliteKeyValueStore, StoreError,
    TaskListController,
};

#[test]
fn tasks_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    {
        let store = KeyValueTaskStore::new(SqliteKeyValueStore::open(&path).unwrap(), "tasks");
        let mut controller = TaskListController::start(store, MemoryView::new());
        controller.add_task(Some("Buy milk")).unwrap();
        controller.add_task(Some("Call mom")).unwrap();
    }

    let store = KeyValueTaskStore::new(SqliteKeyValueStore::open(&path).unwrap(), "tasks");
    let controller = TaskListController::start(store, MemoryView::new());
    assert_eq!(controller.texts(), vec!["Buy milk", "Call mom"]);
    assert_eq!(
        controller.store().kv().get_item("tasks").unwrap().as_deref(),
        Some(r#"["Buy milk","Call mom"]"#)
    );
}

#[test]
fn storage_keys_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    {
        let store = KeyValueTaskStore::new(SqliteKeyValueStore::open(&path).unwrap(), "work");
        let mut controller = TaskListController::start(store, MemoryView::new());
        controller.add_task(Some("Ship release")).unwrap();
    }

    let store = KeyValueTaskStore::new(SqliteKeyValueStore::open(&path).unwrap(), "home");
    let controller = TaskListController::start(store, MemoryView::new());
    assert!(controller.is_empty());
}

#[test]
fn open_applies_migrations_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteKeyValueStore::open(&path) {
        Err(StoreError::UnsupportedSchemaVersion { found, supported }) => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be rejected"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
