use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreError;
use crate::models::CatalogEntry;

use super::connection::{open_database, open_in_memory};
use super::entries::{
    count_entries, create_entry, delete_all_entries, delete_entry, search_entries, update_entry,
};

/// The operations the UI needs from persistence. Calls are synchronous and
/// issued one at a time from the event loop.
pub trait CatalogStore {
    /// Persist a new entry, returning it with the store-assigned id.
    fn create(&self, entry: &CatalogEntry) -> Result<CatalogEntry, StoreError>;
    /// Rewrite the entry matching `entry.id`. Unknown ids are `NotFound`.
    fn update(&self, entry: &CatalogEntry) -> Result<(), StoreError>;
    fn delete_one(&self, id: i64) -> Result<(), StoreError>;
    fn delete_all(&self) -> Result<(), StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
    /// Substring search over name and description, ordered by name.
    fn search(&self, pattern: &str) -> Result<Vec<CatalogEntry>, StoreError>;
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_database(path)?,
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }
}

impl CatalogStore for SqliteStore {
    fn create(&self, entry: &CatalogEntry) -> Result<CatalogEntry, StoreError> {
        create_entry(&self.conn, entry)
    }

    fn update(&self, entry: &CatalogEntry) -> Result<(), StoreError> {
        update_entry(&self.conn, entry)
    }

    fn delete_one(&self, id: i64) -> Result<(), StoreError> {
        delete_entry(&self.conn, id)
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        delete_all_entries(&self.conn)
    }

    fn count(&self) -> Result<usize, StoreError> {
        count_entries(&self.conn)
    }

    fn search(&self, pattern: &str) -> Result<Vec<CatalogEntry>, StoreError> {
        search_entries(&self.conn, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.sqlite");

        let store = SqliteStore::open(&path).unwrap();
        let created = store
            .create(&CatalogEntry::draft("htop", "process viewer", "/usr/bin/htop"))
            .unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.search("").unwrap(), vec![created]);
    }
}
