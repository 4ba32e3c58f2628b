use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. Nothing that happens once frames are flowing is
/// reported through this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot open video source {source_id}: {reason}")]
    SourceOpen { source_id: String, reason: String },

    #[error("Cannot create output {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Detector warmup failed: {0}")]
    Warmup(String),
}

pub type Result<T> = std::result::Result<T, Error>;
