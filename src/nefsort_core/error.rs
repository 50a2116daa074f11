use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NefsortError {
    // Metadata errors
    #[error("Failed to extract metadata from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("Malformed metadata on line {line_number}: {line:?} has no label separator")]
    MalformedMetadataLine { line_number: usize, line: String },

    #[error("Missing metadata field: {0}")]
    MissingDateField(String),

    #[error("Date parsing error: {value:?} ({reason})")]
    InvalidDateFormat { value: String, reason: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move {} -> {}: {error}", source_path.display(), destination.display())]
    MoveFailed {
        source_path: PathBuf,
        destination: PathBuf,
        error: std::io::Error,
    },

    // Filesystem errors
    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    // Generic errors
    #[error("Argument error: {0}")]
    Argument(String),
}

/// Result type for nefsort operations.
pub type Result<T> = std::result::Result<T, NefsortError>;
