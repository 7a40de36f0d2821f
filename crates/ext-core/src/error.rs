//! Error types for ext-core

use std::path::PathBuf;

use ext_actions::ActionKind;

/// Result type for ext-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ext-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is not valid TOML for [`ExtendConfig`](crate::ExtendConfig)
    #[error("Invalid configuration: {message}")]
    ConfigParse { message: String },

    /// An executor answered with a result of the wrong shape
    #[error("Unexpected result from '{action}' action: {result}")]
    UnexpectedActionResult { action: ActionKind, result: String },

    // Transparent wrappers for underlying crate errors
    /// Manifest error from ext-manifest
    #[error(transparent)]
    Manifest(#[from] ext_manifest::Error),

    /// Executor error from ext-actions
    #[error(transparent)]
    Executor(#[from] ext_actions::ExecutorError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse {
            message: err.message().to_string(),
        }
    }
}
