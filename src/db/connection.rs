use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

/// Open (or create) the database file at `path` and make sure the schema is
/// in place. Missing parent directories are created first.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "opened catalog database");
    Ok(conn)
}

/// Throwaway database used by tests and dry runs.
pub fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
        path: ":memory:".into(),
        source,
    })?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Lazily create the single `cli` table.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS cli (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            path TEXT NOT NULL
        )",
        [],
    )
    .map_err(StoreError::Schema)?;
    Ok(())
}
