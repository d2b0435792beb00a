//! Error types for jamplate-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for jamplate-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jamplate-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The hierarchy root does not exist.
    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The hierarchy root is a directory with no documents beneath it.
    #[error("no documents found under {}", .0.display())]
    EmptyHierarchy(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
