use kanban_core::db::migrations::{latest_version, schema_version, SLOT_COLUMNS, SLOT_TABLE};
use kanban_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn slot_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid;")
        .unwrap();
    let columns = stmt
        .query_map([SLOT_TABLE], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    columns
}

#[test]
fn fresh_database_gets_the_slot_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(slot_columns(&conn), SLOT_COLUMNS.to_vec());
}

#[test]
fn reopening_keeps_stored_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES ('current-board-id', '\"b1\"');",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let value: String = conn
        .query_row(
            "SELECT value FROM kv_slots WHERE key = 'current-board-id';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(value, "\"b1\"");
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
}

#[test]
fn slot_keys_are_unique_and_stamped() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES ('kanban-boards', '[]');",
        [],
    )
    .unwrap();
    let duplicate = conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES ('kanban-boards', '[]');",
        [],
    );
    assert!(duplicate.is_err());

    let stamped: i64 = conn
        .query_row(
            "SELECT updated_at FROM kv_slots WHERE key = 'kanban-boards';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(stamped > 0);
}

#[test]
fn newer_store_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slot_table_without_store_columns_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hand_made.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE kv_slots (key TEXT PRIMARY KEY NOT NULL, payload TEXT);
             PRAGMA user_version = 1;",
        )
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::SlotTableMalformed { missing_columns } => {
            assert_eq!(missing_columns, vec!["value", "updated_at"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_slot_table_at_current_version_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_v1.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 1;")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::SlotTableMalformed { ref missing_columns } if missing_columns.len() == SLOT_COLUMNS.len()
    ));
    assert!(err.to_string().contains("key, value, updated_at"));
}
