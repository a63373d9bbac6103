use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while laying out, rasterizing or saving a word cloud.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordCloudError {
    #[error("invalid word cloud configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read font {path}: {source}")]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font {path} contains no usable faces")]
    EmptyFont { path: PathBuf },

    #[error("failed to build word cloud scene: {0}")]
    Svg(#[from] usvg::Error),

    #[error("failed to allocate {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode word cloud image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write word cloud to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
