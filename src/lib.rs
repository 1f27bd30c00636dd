//! Core library surface for the CLI catalog TUI.
//!
//! The binary only wires configuration, logging, and the store together; the
//! state machine, renderer, and persistence live here so they can be tested
//! without a terminal.
pub mod clipboard;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

pub use clipboard::{Clipboard, SystemClipboard};
pub use config::AppConfig;
pub use db::{CatalogStore, SqliteStore};
pub use error::{ClipboardError, StoreError};
pub use models::CatalogEntry;
pub use ui::{run_app, App};
