use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building canonical text resources.
#[derive(Debug, Error)]
pub enum CanonicalError {
    #[error("failed to read stopword list {path}: {source}")]
    StopwordsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
