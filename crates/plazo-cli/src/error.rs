//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid timestamp.
    #[error("Invalid timestamp: {0}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS].")]
    InvalidTimestamp(String),

    /// Invalid date.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid inline suspension.
    #[error("Invalid suspension '{0}'. Use START..END, e.g. \"2024-01-17 08:00..2024-01-18 17:00\".")]
    InvalidSuspension(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Configuration or engine error.
    #[error(transparent)]
    Config(#[from] plazo_config::ConfigError),

    /// Engine error.
    #[error(transparent)]
    Engine(#[from] plazo_core::PlazoError),

    /// IO error.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// JSON input error.
    #[error("Invalid JSON in {path}: {message}")]
    Json {
        /// File being parsed.
        path: String,
        /// Parser message.
        message: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
