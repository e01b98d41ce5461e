//! Error types for lessonkit operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing course pages or writing lesson data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector {0}")]
    InvalidSelector(String),

    #[error("Invalid overlay {}: {reason}", path.display())]
    InvalidOverlay { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
