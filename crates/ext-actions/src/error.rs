//! Error types for ext-actions

use crate::action::ActionKind;

/// Result type for action execution
pub type Result<T> = std::result::Result<T, ExecutorError>;

/// Errors raised by executors and the action registry
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// No executor is bound to the requested action
    #[error("No executor registered for action '{0}'")]
    NotRegistered(ActionKind),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid arguments for action '{action}': {reason}")]
    InvalidArguments { action: ActionKind, reason: String },

    /// The backing command-line tool could not be located
    #[error("'{tool}' not found on PATH")]
    ToolNotFound { tool: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The action ran and reported failure
    #[error("Action '{action}' failed with exit code {exit_code}: {message}")]
    Failed {
        action: ActionKind,
        exit_code: i32,
        message: String,
    },

    #[error("Invalid output from action '{action}': {message}")]
    InvalidOutput { action: ActionKind, message: String },
}
