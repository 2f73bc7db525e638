use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading datasets and orchestrating a run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed dataset {path}: line {line}: {reason}")]
    DatasetShape {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Unknown view direction: {0}")]
    UnknownView(String),

    #[error("Analysis error: {0}")]
    Core(#[from] sitegauge_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
