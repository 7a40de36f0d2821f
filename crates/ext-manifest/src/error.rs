//! Error types for ext-manifest

use std::path::PathBuf;

/// Result type for ext-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest exists but is not structurally valid JSON for a manifest
    #[error("Failed to parse manifest at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize manifest for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error reports a structurally corrupt manifest.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
