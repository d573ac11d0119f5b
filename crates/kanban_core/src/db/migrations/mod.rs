//! Slot table migrations.
//!
//! # Responsibility
//! - List the schema steps of the slot store in version order.
//! - Run each pending step in its own transaction, then check the
//!   resulting `kv_slots` layout.
//!
//! # Invariants
//! - A step and its `PRAGMA user_version` bump commit together.
//! - Board documents live in `kv_slots.value` as JSON text; no other table
//!   is read by the store.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

/// Table holding one row per persisted slot.
pub const SLOT_TABLE: &str = "kv_slots";

/// Columns the store reads and writes.
pub const SLOT_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[Step {
    version: 1,
    name: "kv_slots",
    sql: include_str!("0001_kv_slots.sql"),
}];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` to [`latest_version`] and checks the slot table layout.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::Migration` naming the step that failed; earlier steps stay
///   committed.
/// - `DbError::SlotTableMalformed` when `kv_slots` lacks a store column.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    for step in STEPS.iter().filter(|step| step.version > found) {
        run_step(conn, step)?;
    }

    let missing_columns = missing_slot_columns(conn)?;
    if !missing_columns.is_empty() {
        error!(
            "event=db_migrate module=db status=error error_code=slot_table_malformed missing={}",
            missing_columns.join(",")
        );
        return Err(DbError::SlotTableMalformed { missing_columns });
    }
    Ok(())
}

fn run_step(conn: &mut Connection, step: &Step) -> DbResult<()> {
    let as_migration_error = |source| DbError::Migration {
        version: step.version,
        name: step.name,
        source,
    };

    let tx = conn.transaction()?;
    tx.execute_batch(step.sql).map_err(as_migration_error)?;
    tx.pragma_update(None, "user_version", step.version)
        .map_err(as_migration_error)?;
    tx.commit().map_err(as_migration_error)?;

    info!(
        "event=db_migrate module=db status=ok version={} name={}",
        step.version, step.name
    );
    Ok(())
}

fn missing_slot_columns(conn: &Connection) -> DbResult<Vec<&'static str>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([SLOT_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SLOT_COLUMNS
        .into_iter()
        .filter(|column| !present.iter().any(|name| name == column))
        .collect())
}
