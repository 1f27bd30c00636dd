use rusqlite::{params, Connection, Row};

use crate::error::StoreError;
use crate::models::CatalogEntry;

/// Column list shared by every query that hydrates a [`CatalogEntry`].
const ENTRY_COLUMNS: &str = "id, name, description, path";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        path: row.get(3)?,
    })
}

/// Insert a new entry. The id on `entry` is ignored; the returned value
/// carries the one SQLite assigned.
pub fn create_entry(conn: &Connection, entry: &CatalogEntry) -> Result<CatalogEntry, StoreError> {
    conn.execute(
        "INSERT INTO cli (name, description, path) VALUES (?1, ?2, ?3)",
        params![entry.name, entry.description, entry.path],
    )
    .map_err(StoreError::query("failed to insert entry"))?;

    Ok(CatalogEntry {
        id: conn.last_insert_rowid(),
        ..entry.clone()
    })
}

/// Rewrite all text fields of the entry with the same id.
pub fn update_entry(conn: &Connection, entry: &CatalogEntry) -> Result<(), StoreError> {
    let updated = conn
        .execute(
            "UPDATE cli SET name = ?1, description = ?2, path = ?3 WHERE id = ?4",
            params![entry.name, entry.description, entry.path, entry.id],
        )
        .map_err(StoreError::query("failed to update entry"))?;

    if updated == 0 {
        Err(StoreError::NotFound(entry.id))
    } else {
        Ok(())
    }
}

pub fn delete_entry(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let deleted = conn
        .execute("DELETE FROM cli WHERE id = ?1", params![id])
        .map_err(StoreError::query("failed to delete entry"))?;

    if deleted == 0 {
        Err(StoreError::NotFound(id))
    } else {
        Ok(())
    }
}

/// Remove every entry. Succeeds on an empty table.
pub fn delete_all_entries(conn: &Connection) -> Result<(), StoreError> {
    conn.execute("DELETE FROM cli", [])
        .map_err(StoreError::query("failed to delete all entries"))?;
    Ok(())
}

pub fn count_entries(conn: &Connection) -> Result<usize, StoreError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM cli", [], |row| row.get(0))
        .map_err(StoreError::query("failed to count entries"))?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Entries whose name or description contains `pattern`, ordered by name.
/// The pattern is matched literally; an empty pattern returns everything.
pub fn search_entries(conn: &Connection, pattern: &str) -> Result<Vec<CatalogEntry>, StoreError> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM cli
         WHERE name LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'
         ORDER BY name COLLATE NOCASE, name, id"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(StoreError::query("failed to prepare search query"))?;

    let like = format!("%{}%", escape_like(pattern));
    let entries = stmt
        .query_map(params![like], entry_from_row)
        .map_err(StoreError::query("failed to run search query"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::query("failed to collect search results"))?;

    Ok(entries)
}

/// Escape the `LIKE` wildcards so user input is treated as plain text.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
