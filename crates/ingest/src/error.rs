//! Error types produced by the ingest crate.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Io`](IngestError::Io) | I/O | Export file missing or unreadable |
//! | [`Json`](IngestError::Json) | Syntax | File is not valid JSON (or not UTF-8) |
//! | [`Shape`](IngestError::Shape) | Validation | Valid JSON that is not an object holding a `messages` sequence of objects |
//!
//! Every variant means the export could not be loaded at all; there is no
//! partially loaded export.
//!
//! ```rust
//! use ingest::{load_export, IngestError};
//!
//! match load_export("/no/such/export.json") {
//!     Err(IngestError::Io { path, .. }) => assert!(path.ends_with("export.json")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a chat export.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestError {
    /// The export file could not be opened or read.
    #[error("failed to read chat export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not well-formed JSON.
    #[error("chat export {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well-formed but not shaped like a chat export.
    #[error("chat export has unexpected shape: {0}")]
    Shape(String),
}

impl IngestError {
    /// Returns true when the file itself was reachable but its content was rejected.
    pub fn is_content_error(&self) -> bool {
        matches!(self, IngestError::Json { .. } | IngestError::Shape(_))
    }
}
