//! Typed errors for the two collaborators the UI talks to. The UI never
//! bubbles these up; it turns them into status messages instead.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to create data directory {}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create schema")]
    Schema(#[source] rusqlite::Error),
    #[error("{action}")]
    Query {
        action: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("no CLI with id {0}")]
    NotFound(i64),
}

impl StoreError {
    /// Attach the failing action to a raw SQLite error.
    pub(crate) fn query(action: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StoreError::Query { action, source }
    }
}

/// Failures raised while talking to the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    Unavailable(#[source] arboard::Error),
    #[error("clipboard write failed")]
    Write(#[source] arboard::Error),
}
