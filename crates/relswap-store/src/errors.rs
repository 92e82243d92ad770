//! Error handling for relswap-store
//!
//! Wraps relswap-core ExError with store-specific helpers

use relswap_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an artifact read error for a file that cannot be parsed
pub fn artifact_read(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::ArtifactRead)
        .with_op("read_artifact")
        .with_path(path.display().to_string())
        .with_message(reason.into())
}

/// Create a term syntax error at a byte offset
pub fn term_parse(offset: usize, reason: &str) -> ExError {
    ExError::new(ExErrorKind::ArtifactRead)
        .with_op("term_parse")
        .with_message(format!("{} at offset {}", reason, offset))
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}
