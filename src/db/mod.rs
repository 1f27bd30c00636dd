//! Persistence module split across logical submodules.

mod connection;
mod entries;
mod store;

pub use connection::{ensure_schema, open_database, open_in_memory};
pub use entries::{
    count_entries, create_entry, delete_all_entries, delete_entry, search_entries, update_entry,
};
pub use store::{CatalogStore, SqliteStore};
