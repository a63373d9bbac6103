//! Chat export ingest layer.
//!
//! This is where chat data enters the pipeline. We read a Telegram-style JSON
//! export, check it has the expected shape, and hand back an immutable
//! [`ChatExport`] that downstream stages iterate.
//!
//! ## What we do here
//!
//! - **Read the file fully** - exports are parsed in one go, no streaming
//! - **Validate shape** - a top-level mapping with a `messages` sequence of objects
//! - **Classify message text** - plain strings vs rich content vs missing
//! - **Log everything** - structured logs via tracing for load success and failure
//!
//! ## Example
//!
//! ```
//! use ingest::{parse_export, MessageText};
//!
//! let export = parse_export(r#"{"messages": [{"text": "hello"}, {"text": ["x"]}]}"#).unwrap();
//! assert_eq!(export.plain_texts().collect::<Vec<_>>(), vec!["hello"]);
//! assert!(matches!(export.messages[1].text, MessageText::Rich(_)));
//! ```
use std::fs;
use std::path::Path;
use std::time::Instant;

use serde_json::error::Category;
use serde_json::Value;
use tracing::{info, warn};

mod error;
mod types;

pub use crate::error::IngestError;
pub use crate::types::{ChatExport, Message, MessageText};

/// Loads and validates a chat export from `path`.
pub fn load_export(path: impl AsRef<Path>) -> Result<ChatExport, IngestError> {
    let start = Instant::now();
    let path = path.as_ref();

    match load_export_inner(path) {
        Ok(export) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                path = %path.display(),
                messages = export.len(),
                plain_messages = export.plain_texts().count(),
                elapsed_micros,
                "ingest_success"
            );
            Ok(export)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(path = %path.display(), error = %err, elapsed_micros, "ingest_failure");
            Err(err)
        }
    }
}

fn load_export_inner(path: &Path) -> Result<ChatExport, IngestError> {
    let content = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_slice(&content).map_err(|source| classify(path, source))?;
    decode(path, value)
}

/// Parses an export from an in-memory JSON string.
pub fn parse_export(json: &str) -> Result<ChatExport, IngestError> {
    let path = Path::new("<memory>");
    let value = serde_json::from_str(json).map_err(|source| classify(path, source))?;
    decode(path, value)
}

// serde accepts a sequence for a struct, so the top level is checked first.
fn decode(path: &Path, value: Value) -> Result<ChatExport, IngestError> {
    if !value.is_object() {
        return Err(IngestError::Shape(
            "chat export must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|source| classify(path, source))
}

// Data errors are well-formed JSON in the wrong shape; everything else is a syntax problem.
fn classify(path: &Path, source: serde_json::Error) -> IngestError {
    match source.classify() {
        Category::Data => IngestError::Shape(source.to_string()),
        Category::Io | Category::Syntax | Category::Eof => IngestError::Json {
            path: path.to_path_buf(),
            source,
        },
    }
}
