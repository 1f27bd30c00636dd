//! The single record type managed by the catalog. It mirrors a row of the
//! `cli` table and is passed between the store and the UI as a plain value.

use std::fmt;

/// One catalogued command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Primary key assigned by the store. Entries that have not been persisted
    /// yet carry `0`; the store ignores the value on insert.
    pub id: i64,
    /// Short name shown in lists and used for ordering.
    pub name: String,
    /// Free-form description, searched alongside the name.
    pub description: String,
    /// Filesystem path of the tool. Not checked for existence.
    pub path: String,
}

impl CatalogEntry {
    /// Build an entry that has not been stored yet.
    pub fn draft(
        name: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
