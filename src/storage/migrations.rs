//! Database migrations for plankr.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::PlankrError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, PlankrError> {
    // Try to read from user_version pragma
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| PlankrError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), PlankrError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| PlankrError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), PlankrError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    // Run migrations in order
    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), PlankrError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(PlankrError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `plank_cache`: Local mirror of fetched planks for offline display
/// - `pending_records`: Completed sessions whose upload failed
fn migrate_v1(conn: &Connection) -> Result<(), PlankrError> {
    conn.execute_batch(
        r"
        -- Local mirror of fetched planks
        CREATE TABLE IF NOT EXISTS plank_cache (
            id INTEGER PRIMARY KEY,
            plank_date TEXT NOT NULL,
            duration_s INTEGER NOT NULL,
            inserted_at TEXT,
            fetched_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_plank_cache_date
        ON plank_cache(plank_date);

        -- Completed sessions awaiting upload
        CREATE TABLE IF NOT EXISTS pending_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            duration_s INTEGER NOT NULL,
            plank_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            attempts INTEGER NOT NULL DEFAULT 0,
            last_attempt TEXT,
            last_error TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
        );

        CREATE INDEX IF NOT EXISTS idx_pending_records_status
        ON pending_records(status);
        ",
    )
    .map_err(|e| PlankrError::Database(format!("Migration v1 failed: {e}")))
}
