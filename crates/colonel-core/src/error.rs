//! Error types for Colonel with categorization:
//!
//! - **Discovery errors**: malformed handler metadata (exit code 1)
//! - **Validation errors**: configuration and declaration problems (exit code 1)
//! - **System errors**: IO while loading files (exit code 2)
//! - **Lookup errors**: unknown commands (exit code 3)
//!
//! Outcomes such as a denied permission or a usage message are not errors;
//! see [`crate::DispatchOutcome`].

use thiserror::Error;

/// Errors raised while compiling handler metadata into a routing table.
///
/// Both are permanent: the handler stays unregistered until it is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The handler carries no command header.
    #[error("handler '{handler}' has no command header")]
    MissingHeader { handler: String },

    /// More than one method carries the default-executor marker.
    #[error(
        "handler '{handler}' cannot have more than one default executor \
         (found '{first}' and '{second}')"
    )]
    MultipleDefaultExecutors {
        handler: String,
        first: String,
        second: String,
    },
}

/// Top-level error type for registry, configuration and loading failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Handler metadata could not be discovered
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// A command with the same name is already registered
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    /// Configuration value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(String),

    /// Lookup of a command or label failed
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Map the error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Discovery(_)
            | Self::DuplicateCommand(_)
            | Self::InvalidConfig(_)
            | Self::ParseError(_) => 1,
            Self::IoError(_) => 2,
            Self::NotFound(_) => 3,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::ParseError(format!("Failed to parse config: {err}"))
    }
}

/// Result type alias for Colonel operations
pub type Result<T> = std::result::Result<T, Error>;
