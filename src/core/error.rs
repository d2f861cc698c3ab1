//! Error codes surfaced by document read/write operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

/// Failure family for document I/O.
///
/// The container passes these through unchanged; only the document
/// implementation that produced one knows more than success/failure.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("malformed content: {0}")]
    Malformed(String),
    #[error("no backing file path")]
    NoBackingPath,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Fold a raw `std::io::Error` into the family, keeping the path
    /// in the message for the common kinds.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_string()),
            std::io::ErrorKind::InvalidData => Self::Malformed(path.to_string()),
            _ => Self::Io(err),
        }
    }
}
