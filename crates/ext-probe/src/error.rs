//! Error types for ext-probe

/// Result type for prober construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a prober
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Why a reachability request failed.
///
/// Variants are listed in classification priority order. Each carries the
/// human-readable message of the underlying failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    /// The registry answered with a 4xx status
    #[error("{message}")]
    ClientError { message: String },

    /// The registry answered with a 5xx status
    #[error("{message}")]
    ServerError { message: String },

    /// The request never produced a response (DNS, connect, timeout)
    #[error("{message}")]
    TransportError { message: String },

    /// Anything not recognised as a request failure
    #[error("{message}")]
    OtherError { message: String },
}

impl ProbeFailure {
    pub fn client(message: impl Into<String>) -> Self {
        Self::ClientError {
            message: message.into(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::ServerError {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::OtherError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ClientError { message }
            | Self::ServerError { message }
            | Self::TransportError { message }
            | Self::OtherError { message } => message,
        }
    }
}
